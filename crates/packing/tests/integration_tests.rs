//! End-to-end tests for container loading.
//!
//! Runs the full pipeline (ItemSpec → Packer.solve() → PackingResult) and
//! checks the physical invariants on every result.

use std::collections::HashMap;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stowage_core::solver::{Config, Solver, Strategy};
use stowage_core::{PackingResult, Placement, UnplacedReason};
use stowage_packing::{ContainerSpec, ItemSpec, Packer, RotationPermissions};

const EPS: f64 = 1e-3;

fn solve(
    items: &[ItemSpec],
    container: &ContainerSpec,
    strategy: Strategy,
    containers: usize,
) -> PackingResult {
    let packer = Packer::new(
        Config::new()
            .with_strategy(strategy)
            .with_container_count(containers),
    );
    packer.solve(items, container).expect("packing should succeed")
}

fn overlap_1d(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    a1.min(b1) - a0.max(b0)
}

/// Asserts bounds, overlap, support, non-stackable, weight and conservation.
fn assert_invariants(result: &PackingResult, items: &[ItemSpec], container: &ContainerSpec) {
    let by_id: HashMap<&str, &ItemSpec> = items.iter().map(|i| (i.id().as_str(), i)).collect();
    let total: usize = items.iter().map(|i| i.quantity()).sum();

    assert_eq!(
        result.placed_count() + result.unplaced_count(),
        total,
        "every instance is either placed or reported"
    );

    for index in 0..result.containers_used {
        let inside: Vec<&Placement> = result.placements_in(index).collect();

        let weight: f64 = inside.iter().map(|p| p.weight).sum();
        assert!(
            weight <= container.max_payload() + 1e-4,
            "container {} overweight: {}",
            index,
            weight
        );

        for p in &inside {
            let max = p.max_corner();
            assert!(p.position.x >= -EPS && p.position.y >= -EPS && p.position.z >= -EPS);
            assert!(max.x <= container.length() + EPS, "{} exceeds length", p.instance_id);
            assert!(max.y <= container.height() + EPS, "{} exceeds height", p.instance_id);
            assert!(max.z <= container.width() + EPS, "{} exceeds width", p.instance_id);
        }

        for (i, a) in inside.iter().enumerate() {
            for b in inside.iter().skip(i + 1) {
                let (amax, bmax) = (a.max_corner(), b.max_corner());
                let dx = overlap_1d(a.position.x, amax.x, b.position.x, bmax.x);
                let dy = overlap_1d(a.position.y, amax.y, b.position.y, bmax.y);
                let dz = overlap_1d(a.position.z, amax.z, b.position.z, bmax.z);
                assert!(
                    dx <= 2.0 * EPS || dy <= 2.0 * EPS || dz <= 2.0 * EPS,
                    "{} overlaps {}",
                    a.instance_id,
                    b.instance_id
                );
            }
        }

        for p in inside.iter().filter(|p| p.position.y > EPS) {
            let pmax = p.max_corner();
            let below = inside
                .iter()
                .filter(|q| (q.max_corner().y - p.position.y).abs() < EPS);

            let mut supported = false;
            for q in below {
                let qmax = q.max_corner();
                let dx = overlap_1d(p.position.x, pmax.x, q.position.x, qmax.x);
                let dz = overlap_1d(p.position.z, pmax.z, q.position.z, qmax.z);
                let stackable = by_id[q.item_id.as_str()].is_stackable();
                if !stackable {
                    assert!(
                        dx <= EPS || dz <= EPS,
                        "{} rests on non-stackable {}",
                        p.instance_id,
                        q.instance_id
                    );
                } else if dx > EPS && dz > EPS {
                    supported = true;
                }
            }
            assert!(supported, "{} is floating", p.instance_id);
        }
    }
}

#[test]
fn test_unit_cubes_fill_grid() {
    let items = vec![ItemSpec::box_shape("cube", 1.0, 1.0, 1.0)
        .with_quantity(8)
        .with_weight(10.0)
        .with_rotation(RotationPermissions::none())];
    let container = ContainerSpec::new(2.0, 2.0, 2.0).with_max_payload(1000.0);

    let result = solve(&items, &container, Strategy::FirstFitDecreasing, 1);

    assert_eq!(result.placed_count(), 8);
    assert_eq!(result.unplaced_count(), 0);

    let mut cells: Vec<(i32, i32, i32)> = result
        .placements
        .iter()
        .map(|p| {
            (
                p.position.x.round() as i32,
                p.position.y.round() as i32,
                p.position.z.round() as i32,
            )
        })
        .collect();
    cells.sort();
    cells.dedup();
    assert_eq!(cells.len(), 8);
    assert!(cells
        .iter()
        .all(|&(x, y, z)| (0..2).contains(&x) && (0..2).contains(&y) && (0..2).contains(&z)));
    assert_invariants(&result, &items, &container);
}

#[test]
fn test_weight_limit_stops_loading() {
    let items = vec![ItemSpec::box_shape("cube", 1.0, 1.0, 1.0)
        .with_name("Cube")
        .with_quantity(8)
        .with_weight(10.0)
        .with_rotation(RotationPermissions::none())];
    let container = ContainerSpec::new(2.0, 2.0, 2.0).with_max_payload(50.0);

    let result = solve(&items, &container, Strategy::FirstFitDecreasing, 1);

    assert_eq!(result.placed_count(), 5);
    assert_eq!(result.unplaced.len(), 1);

    let entry = &result.unplaced[0];
    assert_eq!(entry.item_name, "Cube");
    assert_eq!(entry.quantity, 3);
    assert!(entry.has_reason(|r| matches!(r, UnplacedReason::ExceedsWeightLimit { .. })));
    assert!(entry.reason().contains("Exceeds weight limit (Cont. 1 - FFD)."));
    assert_relative_eq!(result.total_weight, 50.0);
    assert_invariants(&result, &items, &container);
}

#[test]
fn test_oversized_item_prefiltered() {
    let items = vec![ItemSpec::box_shape("huge", 3.0, 3.0, 3.0).with_name("Huge")];
    let container = ContainerSpec::new(2.0, 2.0, 2.0);

    let result = solve(&items, &container, Strategy::FirstFitDecreasing, 2);

    assert_eq!(result.placed_count(), 0);
    let entry = result.unplaced_for("Huge").unwrap();
    assert_eq!(entry.quantity, 1);
    // Never attempted per container, so no per-container reason appears.
    assert_eq!(entry.reasons, vec![UnplacedReason::ExceedsContainerDimensions]);
    assert_eq!(entry.reason(), "Exceeds container dimensions in all orientations.");
}

#[test]
fn test_nothing_rests_on_non_stackable() {
    // The fragile box covers the whole floor, so the small box has nowhere to go.
    let items = vec![
        ItemSpec::box_shape("fragile", 2.0, 2.0, 1.0).with_non_stackable(true),
        ItemSpec::box_shape("small", 1.0, 1.0, 1.0).with_name("Small"),
    ];
    let container = ContainerSpec::new(2.0, 2.0, 2.0);

    for strategy in [Strategy::FirstFitDecreasing, Strategy::BestFitDecreasing] {
        let result = solve(&items, &container, strategy, 1);

        assert_eq!(result.placed_count(), 1);
        assert_eq!(result.placements[0].item_id, "fragile");
        let entry = result.unplaced_for("Small").unwrap();
        assert!(entry.has_reason(|r| matches!(r, UnplacedReason::NoSuitableSpace { .. })));
        assert_invariants(&result, &items, &container);
    }
}

#[test]
fn test_non_stackable_with_free_floor() {
    let items = vec![
        ItemSpec::box_shape("fragile", 1.0, 1.0, 1.0).with_non_stackable(true),
        ItemSpec::box_shape("small", 0.5, 0.5, 0.5).with_quantity(12),
    ];
    let container = ContainerSpec::new(2.0, 1.0, 2.0);

    for strategy in [Strategy::FirstFitDecreasing, Strategy::BestFitDecreasing] {
        let result = solve(&items, &container, strategy, 1);

        let fragile = result
            .placements
            .iter()
            .find(|p| p.item_id == "fragile")
            .unwrap();
        let top = fragile.max_corner();
        for p in result.placements.iter().filter(|p| p.item_id == "small") {
            let above = p.position.y >= top.y - EPS;
            let dx = overlap_1d(p.position.x, p.max_corner().x, fragile.position.x, top.x);
            let dz = overlap_1d(p.position.z, p.max_corner().z, fragile.position.z, top.z);
            assert!(!(above && dx > EPS && dz > EPS), "{} sits on fragile", p.instance_id);
        }
        assert_invariants(&result, &items, &container);
    }
}

#[test]
fn test_cylinders_stand_and_lie() {
    let items = vec![
        ItemSpec::cylinder("drum", 1.0, 1.0).with_quantity(4),
        ItemSpec::cylinder("roll", 0.5, 2.0).with_quantity(2),
    ];
    let container = ContainerSpec::new(3.0, 2.0, 1.0);

    let result = solve(&items, &container, Strategy::FirstFitDecreasing, 1);

    assert!(result.all_placed());
    // Rolls are too tall to stand and must lie down.
    for roll in result.placements.iter().filter(|p| p.item_id == "roll") {
        assert!(!roll.rotation.is_identity());
        assert!(roll.dimensions.y <= 0.5 + EPS);
    }
    assert_invariants(&result, &items, &container);
}

#[test]
fn test_second_container_takes_overflow() {
    let items = vec![ItemSpec::box_shape("pallet", 1.0, 1.0, 1.0)
        .with_name("Pallet")
        .with_quantity(10)
        .with_weight(100.0)];
    let container = ContainerSpec::new(2.0, 2.0, 1.0).with_max_payload(350.0);

    let result = solve(&items, &container, Strategy::BestFitDecreasing, 2);

    assert_eq!(result.placements_in(0).count(), 3);
    assert_eq!(result.placements_in(1).count(), 3);
    assert_eq!(result.containers.len(), 2);
    assert_eq!(result.containers[1].item_count, 3);

    let entry = result.unplaced_for("Pallet").unwrap();
    assert_eq!(entry.quantity, 4);
    assert_eq!(
        entry.reason(),
        "Exceeds weight limit (Cont. 1 - BFD).; \
         Exceeds weight limit (Cont. 2 - BFD).; \
         Not packed in any available container."
    );
    assert_invariants(&result, &items, &container);
}

#[test]
fn test_unplaced_report_in_item_order() {
    let items = vec![
        ItemSpec::box_shape("big", 5.0, 5.0, 5.0).with_name("Big"),
        ItemSpec::box_shape("cube", 1.0, 1.0, 1.0)
            .with_name("Cube")
            .with_quantity(3),
    ];
    let container = ContainerSpec::new(1.0, 1.0, 1.0);

    let result = solve(&items, &container, Strategy::FirstFitDecreasing, 1);

    let names: Vec<&str> = result.unplaced.iter().map(|e| e.item_name.as_str()).collect();
    assert_eq!(names, vec!["Big", "Cube"]);
    assert_eq!(result.unplaced[1].quantity, 2);
}

fn random_items(rng: &mut StdRng, n: usize) -> Vec<ItemSpec> {
    (0..n)
        .map(|i| {
            let item = if rng.gen_bool(0.25) {
                ItemSpec::cylinder(
                    format!("C{}", i),
                    rng.gen_range(0.2..1.0),
                    rng.gen_range(0.2..1.5),
                )
            } else {
                ItemSpec::box_shape(
                    format!("B{}", i),
                    rng.gen_range(0.2..1.5),
                    rng.gen_range(0.2..1.2),
                    rng.gen_range(0.2..1.2),
                )
            };
            item.with_quantity(rng.gen_range(1..5))
                .with_weight(rng.gen_range(0.0..300.0))
                .with_non_stackable(rng.gen_bool(0.2))
                .with_rotation(RotationPermissions {
                    x: rng.gen_bool(0.5),
                    y: rng.gen_bool(0.7),
                    z: rng.gen_bool(0.5),
                })
        })
        .collect()
}

#[test]
fn test_invariants_on_random_loads() {
    let mut rng = StdRng::seed_from_u64(42);
    let container = ContainerSpec::new(3.0, 2.0, 2.0).with_max_payload(2500.0);

    for round in 0..12 {
        let items = random_items(&mut rng, 8);
        let containers = 1 + round % 2;
        for strategy in [Strategy::FirstFitDecreasing, Strategy::BestFitDecreasing] {
            let result = solve(&items, &container, strategy, containers);
            assert_eq!(result.containers_used, containers);
            assert_invariants(&result, &items, &container);
        }
    }
}

#[test]
fn test_runs_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    let items = random_items(&mut rng, 10);
    let container = ContainerSpec::new(3.0, 2.0, 2.0).with_max_payload(1500.0);

    for strategy in [Strategy::FirstFitDecreasing, Strategy::BestFitDecreasing] {
        let a = solve(&items, &container, strategy, 2);
        let b = solve(&items, &container, strategy, 2);
        assert_eq!(a.placements, b.placements);
        assert_eq!(a.unplaced, b.unplaced);
        assert_eq!(a.containers, b.containers);
    }
}

#[test]
fn test_strategies_share_first_placement() {
    let mut rng = StdRng::seed_from_u64(2024);
    let items = random_items(&mut rng, 6);
    let container = ContainerSpec::new(3.0, 2.0, 2.0);

    // Both strategies start with the same instance in the origin corner.
    let ffd = solve(&items, &container, Strategy::FirstFitDecreasing, 1);
    let bfd = solve(&items, &container, Strategy::BestFitDecreasing, 1);
    if let (Some(f), Some(b)) = (ffd.placements.first(), bfd.placements.first()) {
        assert_eq!(f.instance_id, b.instance_id);
        assert_eq!(f.position, b.position);
        assert_relative_eq!(b.position.x, 0.0);
    }
}
