//! Integration-level tests for the `stuff` facade crate.

use stuff::*;

use approx::assert_abs_diff_eq;

#[derive(StuffKind)]
#[stuff(domain = integer, min_amount = 6, unit_size = 3)]
struct MyStuff;

#[derive(StuffKind)]
#[stuff(
    name = "MyKind",
    domain = integer,
    min_amount = 6,
    unit_size = 3,
    minimum_rule = remainder_only
)]
struct Lenient;

#[derive(StuffKind)]
#[stuff(domain = real, min_amount = 0.5, unit_size = 2)]
struct Water;

#[derive(Debug)]
struct Tool {
    id: ItemId,
}

impl Item for Tool {
    fn id(&self) -> ItemId {
        self.id
    }
}

#[derive(Debug)]
struct Toy(u64);

impl Item for Toy {
    fn id(&self) -> ItemId {
        ItemId::new(self.0)
    }
}

#[derive(Debug)]
struct Parcel {
    id: u64,
    weight: f64,
}

impl Item for Parcel {
    fn id(&self) -> ItemId {
        ItemId::new(self.id)
    }

    fn size(&self) -> Option<f64> {
        Some(self.weight)
    }
}

#[derive(StuffKind)]
#[stuff(domain = identity_set, item_type = Tool)]
struct Toolbox;

#[derive(StuffKind)]
#[stuff(name = "Mail", domain = identity_set, sized_items = true)]
struct Mailbag;

fn tools(count: usize) -> Vec<Tool> {
    (0..count).map(|_| Tool { id: ItemId::fresh() }).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Worked scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn worked_scenario_moves_taken_part_into_x() {
    let mut x = MyStuff::create(9).unwrap();
    let mut y = MyStuff::create(18).unwrap();
    let mut piece = y.take(6).unwrap();
    piece.transfer_right(&mut x).unwrap();
    assert_eq!(x.amount(), Measure::Count(15));
    assert_eq!(y.amount(), Measure::Count(12));
    assert!(piece.is_empty());
}

#[test]
fn granularity_sequence_checks_the_remainder() {
    let mut x = Lenient::create(9).unwrap();
    assert!(matches!(
        x.take(2),
        Err(StuffError::GranularityViolation { .. })
    ));
    assert_eq!(x.amount(), Measure::Count(9));

    let _three = x.take(3).unwrap();
    assert_eq!(x.amount(), Measure::Count(6));

    assert!(matches!(x.take(3), Err(StuffError::BelowMinimum { .. })));
    assert_eq!(x.amount(), Measure::Count(6));

    let _six = x.take(6).unwrap();
    assert_eq!(x.amount(), Measure::Count(0));
    assert_eq!(x.to_string(), "[0 of MyKind]");
}

#[test]
fn strict_rule_rejects_small_taken_part() {
    let mut x = MyStuff::create(9).unwrap();
    assert_eq!(
        x.take(3).unwrap_err(),
        StuffError::BelowMinimum {
            amount: Measure::Count(3),
            min_amount: Measure::Count(6)
        }
    );
    assert_eq!(x.amount(), Measure::Count(9));
}

#[test]
fn multi_step_rollback() {
    let mut a = MyStuff::create(18).unwrap();
    assert!(!a.can_split([6, 30]));
    let err = a.split([6, 30]).unwrap_err();
    assert_eq!(
        err,
        StuffError::InsufficientAmount {
            requested: Measure::Count(30),
            available: Measure::Count(12)
        }
    );
    assert_eq!(a.amount(), Measure::Count(18));
}

// ─────────────────────────────────────────────────────────────────────────────
// Kinds
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn derived_kinds_carry_their_policy() {
    assert_eq!(MyStuff::kind().name(), "MyStuff");
    assert_eq!(
        MyStuff::kind().policy(),
        &UnitPolicy::Integer {
            min_amount: 6,
            unit_size: 3
        }
    );
    assert_eq!(Lenient::kind().minimum_rule(), MinimumRule::RemainderOnly);
    assert_eq!(Water::kind().domain(), Domain::Real);
    assert_eq!(Toolbox::kind().item_type(), Some(ItemType::of::<Tool>()));
    assert_eq!(Mailbag::kind().name(), "Mail");
}

#[test]
fn typed_stuff_round_trips_through_quantity() {
    let q: Quantity = MyStuff::create(9).unwrap().into();
    assert_eq!(q.kind(), MyStuff::kind());
    let typed = Stuff::<MyStuff>::try_from_quantity(q).unwrap();
    assert_eq!(typed.units(), Some(3));

    let other = Lenient::kind().create(9).unwrap();
    assert!(Stuff::<MyStuff>::try_from_quantity(other).is_err());
}

#[test]
fn runtime_kind_mismatch() {
    let mut a = MyStuff::kind().create(9).unwrap();
    let mut b = Lenient::kind().create(9).unwrap();
    assert!(matches!(
        a.merge(&mut b),
        Err(StuffError::KindMismatch { .. })
    ));
    assert_eq!(a.amount(), Measure::Count(9));
    assert_eq!(b.amount(), Measure::Count(9));
}

#[test]
fn large_counts_move_exactly() {
    let big = Kind::integer("Big").build().unwrap();
    assert_eq!(big.create(u64::MAX).unwrap().amount(), Measure::Count(u64::MAX));

    let half = i64::MAX as u64;
    let mut a = big.create(half).unwrap();
    let mut b = big.create(half).unwrap();
    a.merge_into(&mut b).unwrap();
    assert_eq!(a.amount(), Measure::Count(2 * half));

    let piece = a.take(half + 10).unwrap();
    assert_eq!(piece.amount(), Measure::Count(half + 10));
    assert_eq!(a.amount(), Measure::Count(half - 10));

    let too_many = Portion::Count(i128::from(u64::MAX) + 1);
    assert!(matches!(
        a.take(too_many),
        Err(StuffError::InvalidAmount(_))
    ));
    assert_eq!(a.amount(), Measure::Count(half - 10));
}

// ─────────────────────────────────────────────────────────────────────────────
// Real stuff
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn real_stuff_size_and_residue() {
    let mut a = Water::create(0.7).unwrap();
    let mut b = Water::create(0.6).unwrap();
    a.merge_into(&mut b).unwrap();
    assert_abs_diff_eq!(a.size(), 2.6, epsilon = 1e-12);

    let total = a.amount();
    let mut poured = a.take(0.6).unwrap();
    let mut rest = a.take(0.7).unwrap();
    assert!(a.is_empty());

    poured.merge_into(&mut rest).unwrap();
    assert_eq!(poured.amount(), total);
}

#[test]
fn real_stuff_minimum() {
    let mut a = Water::create(1.0).unwrap();
    assert!(matches!(a.take(0.75), Err(StuffError::BelowMinimum { .. })));
    assert!(matches!(
        Water::create(0.25),
        Err(StuffError::BelowMinimum { .. })
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Identity sets
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn toolbox_rejects_other_item_types() {
    let mut box_a = Toolbox::create_items(tools(2)).unwrap();
    let before = box_a.item_ids();
    assert!(matches!(
        box_a.insert(Toy(1)),
        Err(StuffError::TypeRestrictionViolation { .. })
    ));
    assert_eq!(box_a.item_ids(), before);
    assert!(matches!(
        Toolbox::create_items([Toy(2)]),
        Err(StuffError::TypeRestrictionViolation { .. })
    ));
}

#[test]
fn toolbox_moves_items() {
    let mut box_a = Toolbox::create_items(tools(3)).unwrap();
    let mut box_b = Toolbox::empty();
    let first = box_a.item_ids()[0];

    let mut hammer = box_a.take(first).unwrap();
    hammer.transfer_right(&mut box_b).unwrap();
    assert!(box_b.contains(first));
    assert!(!box_a.contains(first));
    assert_eq!(box_a.amount(), Measure::Items(2));

    assert_eq!(
        box_a.take(first).unwrap_err(),
        StuffError::ItemNotPresent(first)
    );
}

#[test]
fn mailbag_sizes_items() {
    let bag = Mailbag::create_items([
        Parcel { id: 1, weight: 2.5 },
        Parcel { id: 2, weight: 0.5 },
    ])
    .unwrap();
    assert_abs_diff_eq!(bag.size(), 3.0);
    assert_eq!(Mailbag::kind().min_size(), 0.0);

    assert!(matches!(
        Mailbag::create_items([Toy(3)]),
        Err(StuffError::TypeRestrictionViolation { .. })
    ));
}

#[test]
fn mixed_batch_into_unrestricted_kind() {
    let bin = Kind::identity_set("Bin").build().unwrap();
    let batch = ItemBatch::new().with(Toy(1)).with(Tool {
        id: ItemId::new(2),
    });
    let mut q = bin.create_batch(batch).unwrap();
    assert_eq!(q.amount(), Measure::Items(2));

    let toys = q.take_where(|item| item.id() == ItemId::new(1)).unwrap();
    assert_eq!(toys.item_ids(), vec![ItemId::new(1)]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Summaries
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn describe_renders_summary() {
    let x = MyStuff::create(9).unwrap();
    let summary = x.describe();
    assert_eq!(summary.to_string(), "[9 of MyStuff]");
    assert_eq!(summary.size, 27.0);

    let json = serde_json::to_string(&summary).unwrap();
    assert_eq!(json, r#"{"kind_name":"MyStuff","amount":9,"size":27.0}"#);
}
