use models::v1::ForceType;
use rstest::rstest;
use simulator::{InstanceIdAllocator, Overlay, OverlayDuration, PlayerPressure, PressureKind, ResourcePool};

#[rstest]
fn test_gain_and_spend() {
    let mut pool = ResourcePool::new([(ForceType::Heat, 3)]);
    assert_eq!(pool.gain(ForceType::Heat, 4), 4);
    assert!(pool.spend(ForceType::Heat, 7));
    assert!(!pool.spend(ForceType::Heat, 1));
    assert_eq!(pool.drain(ForceType::Heat, 5), 0);
    assert_eq!(pool.total(), 0);
}

#[rstest]
fn test_tightest_hard_cap_wins() {
    let mut ids = InstanceIdAllocator::default();
    let (a, b) = (ids.allocate(), ids.allocate());
    let mut pool = ResourcePool::new([(ForceType::Entropy, 10)]);

    pool.install_hard_cap(ForceType::Entropy, Overlay::new(6, OverlayDuration::Passive, Some(a)));
    pool.install_hard_cap(ForceType::Entropy, Overlay::new(4, OverlayDuration::Ticks(2), Some(b)));
    assert_eq!(pool.amount(ForceType::Entropy), 4);

    pool.install_hard_cap(ForceType::Entropy, Overlay::new(8, OverlayDuration::Ticks(2), Some(b)));
    assert_eq!(pool.hard_cap(ForceType::Entropy), Some(6));

    pool.release_passive(a);
    assert_eq!(pool.hard_cap(ForceType::Entropy), Some(8));

    pool.expire();
    pool.expire();
    assert_eq!(pool.hard_cap(ForceType::Entropy), Some(8));
    pool.expire();
    assert_eq!(pool.hard_cap(ForceType::Entropy), None);
}

#[rstest]
#[case(&[(ForceType::Heat, 20_000_000), (ForceType::Precision, 20_000_000)], 10, [5, 5, 0, 0, 0])]
#[case(&[(ForceType::Heat, 7), (ForceType::Precision, 7), (ForceType::Momentum, 7)], 10, [3, 3, 4, 0, 0])]
#[case(&[(ForceType::Heat, 9), (ForceType::Precision, 4), (ForceType::Momentum, 4)], 12, [4, 4, 4, 0, 0])]
#[case(&[(ForceType::Heat, 9), (ForceType::Precision, 4), (ForceType::Momentum, 4)], 11, [3, 4, 4, 0, 0])]
#[case(&[(ForceType::Balance, 3), (ForceType::Entropy, 1)], 0, [0, 0, 0, 0, 0])]
#[case(&[(ForceType::Heat, 2), (ForceType::Entropy, 1)], 5, [2, 0, 0, 0, 1])]
fn test_total_cap_levels_down(
    #[case] initial: &[(ForceType, u32)],
    #[case] cap: u32,
    #[case] expected: [u32; 5],
) {
    let mut pool = ResourcePool::new(initial.iter().copied());
    pool.install_total_cap(Overlay::new(cap, OverlayDuration::Permanent, None));
    let amounts = ForceType::ALL.map(|force| pool.amount(force));
    assert_eq!(amounts, expected);
    assert!(pool.total() <= cap);
}

#[rstest]
fn test_snapshot_reports_caps() {
    let mut pool = ResourcePool::new([(ForceType::Precision, 5), (ForceType::Balance, 2)]);
    pool.install_soft_cap(ForceType::Precision, Overlay::new(3, OverlayDuration::Permanent, None));

    let snapshot = pool.snapshot();
    assert_eq!(snapshot.forces.len(), 5);
    assert_eq!(snapshot.total(), 7);
    assert_eq!(snapshot.forces[&ForceType::Precision].soft_cap, Some(3));
    assert!(snapshot.forces[&ForceType::Precision].over_soft_cap());
    assert!(!snapshot.forces[&ForceType::Balance].over_soft_cap());
    assert_eq!(snapshot.total_cap, None);
}

#[rstest]
fn test_pressure_combines_sources() {
    let mut ids = InstanceIdAllocator::default();
    let (a, b) = (ids.allocate(), ids.allocate());
    let mut pressure = PlayerPressure::default();

    pressure.install(PressureKind::HandSizeLimit, Overlay::new(7, OverlayDuration::Passive, Some(a)));
    pressure.install(PressureKind::HandSizeLimit, Overlay::new(5, OverlayDuration::Permanent, Some(b)));
    pressure.install(PressureKind::CardCostPenalty, Overlay::new(2, OverlayDuration::Passive, Some(a)));
    pressure.install(PressureKind::CardCostPenalty, Overlay::new(1, OverlayDuration::Passive, Some(b)));
    assert_eq!(pressure.hand_size_limit(), Some(5));
    assert_eq!(pressure.card_cost_penalty(), 3);

    pressure.release_source(b);
    assert_eq!(pressure.hand_size_limit(), Some(7));
    pressure.release_all_passive();
    assert_eq!(pressure.hand_size_limit(), None);
    assert_eq!(pressure.card_cost_penalty(), 0);
}
