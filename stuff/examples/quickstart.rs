//! Minimal end-to-end example: move stuff between quantities, then split with rollback.

use stuff::{Measure, StuffError, StuffKind};

#[derive(StuffKind)]
#[stuff(domain = integer, min_amount = 6, unit_size = 3)]
struct MyStuff;

fn main() {
    let mut x = MyStuff::create(9).unwrap();
    let mut y = MyStuff::create(18).unwrap();

    let mut piece = y.take(6).unwrap();
    piece.transfer_right(&mut x).unwrap();
    assert_eq!(x.amount(), Measure::Count(15));
    assert_eq!(y.amount(), Measure::Count(12));
    println!("{} {}", x.describe(), y.describe());

    let err = y.split([6, 30]).unwrap_err();
    assert!(matches!(err, StuffError::InsufficientAmount { .. }));
    assert_eq!(y.amount(), Measure::Count(12));
    println!("rejected: {err}");
}
