//! Tests for the solver driver, solve reports and the room layout lifecycle

#[cfg(test)]
mod tests {
    use roomlayout::LayoutError;
    use roomlayout::algorithm::random::RandomSelector;
    use roomlayout::algorithm::rules::RuleTriple;
    use roomlayout::algorithm::search::SearchPolicy;
    use roomlayout::algorithm::solver::{
        RoomLayout, RulePolicy, SolverConfig, choose_strategy, solve, solve_with_config,
    };
    use roomlayout::spatial::items::{CollisionClass, Item, furniture_catalog};

    fn item(length: usize, width: usize, name: &str, class: CollisionClass) -> Item {
        Item::new(length, width, name, class).expect("valid item")
    }

    // Tests a single hard block lands inside the walls and nowhere else
    #[test]
    fn test_single_hard_item_in_small_room() {
        let layout = solve(10, 10, vec![item(2, 2, "A", CollisionClass::Hard)], None, 42)
            .expect("solve");

        let cells = layout.grid().cells_with_occupant("A");
        assert_eq!(cells.len(), 4);
        for &(x, y) in &cells {
            assert!((1..9).contains(&x) && (1..9).contains(&y), "({x}, {y}) on the wall");
            let view = layout.query_cell(x, y).expect("cell");
            assert_eq!(view.collision_score, 2);
            assert_eq!(view.topmost(), Some("A"));
        }
        for x in 1..9 {
            for y in 1..9 {
                if !cells.contains(&(x, y)) {
                    assert_eq!(layout.query_cell(x, y).expect("cell").collision_score, 0);
                }
            }
        }
        assert!(layout.report().is_complete());
    }

    // Tests an item without a feasible anchor is recorded and never committed
    // Verified by committing a default anchor on failure
    #[test]
    fn test_unplaceable_item_is_reported() {
        let layout = solve(3, 3, vec![item(2, 2, "A", CollisionClass::Soft)], None, 1)
            .expect("solve");
        let report = layout.report();

        assert_eq!(report.placed_count(), 0);
        assert_eq!(report.unplaced_count(), 1);
        assert_eq!(report.outcomes[0].anchor, None);
        assert!(layout.grid().cells_with_occupant("A").is_empty());
        assert_eq!(layout.query_cell(1, 1).expect("cell").collision_score, 0);
        assert!(matches!(
            report.require_all_placed(),
            Err(LayoutError::PlacementFailure { ref item, index: 0 }) if item == "A"
        ));
    }

    // Tests items larger than the address space and huge avoid radii are handled
    // Verified by adding item extents and zone bounds without overflow checks
    #[test]
    fn test_oversized_item_and_huge_radius() {
        let items = vec![
            item(usize::MAX, 1, "Huge", CollisionClass::Soft),
            item(1, usize::MAX, "Wide", CollisionClass::Hard),
            item(1, 1, "Bed", CollisionClass::Soft),
            item(1, 1, "Chair", CollisionClass::Soft),
        ];
        let config = SolverConfig {
            seed: 3,
            rule_policy: RulePolicy::Enforce,
            avoid_radius: usize::MAX,
        };
        let rules = [RuleTriple::avoid("Bed", "Wall")];

        let layout = solve_with_config(10, 10, items, Some(&rules), &config).expect("solve");
        let report = layout.report();

        assert_eq!(report.outcomes.len(), 4);
        assert_eq!(report.placed_count(), 1);
        assert!(layout.grid().cells_with_occupant("Huge").is_empty());
        assert!(layout.grid().cells_with_occupant("Wide").is_empty());
        assert!(layout.grid().cells_with_occupant("Bed").is_empty());
        assert_eq!(layout.grid().cells_with_occupant("Chair").len(), 1);
        assert!(layout.query_cell(5, 5).expect("cell").avoids("Bed"));
    }

    // Tests soft items never overlap once the floor is full
    #[test]
    fn test_soft_items_compete_for_floor() {
        let items = vec![
            item(4, 4, "Rug", CollisionClass::Soft),
            item(1, 1, "Chair", CollisionClass::Soft),
            item(2, 2, "Light", CollisionClass::Ghost),
        ];
        let layout = solve(6, 6, items, None, 9).expect("solve");
        let report = layout.report();

        assert!(report.outcomes[0].is_placed());
        assert!(!report.outcomes[1].is_placed());
        assert!(report.outcomes[2].is_placed());
        assert_eq!(report.unplaced().map(|o| o.item.as_str()).collect::<Vec<_>>(), vec!["Chair"]);
    }

    // Tests one seed reproduces one layout
    #[test]
    fn test_same_seed_same_layout() {
        let first = solve(120, 160, furniture_catalog(), None, 7).expect("solve");
        let second = solve(120, 160, furniture_catalog(), None, 7).expect("solve");

        assert_eq!(first.report(), second.report());
        for name in ["Bed", "DeskAndChair", "Couch", "Shelf", "Light"] {
            assert_eq!(
                first.grid().cells_with_occupant(name),
                second.grid().cells_with_occupant(name)
            );
        }
    }

    // Tests fixed policies pin the search family
    #[test]
    fn test_choose_strategy_policies() {
        let mut random = RandomSelector::new(4);
        for _ in 0..32 {
            assert_eq!(choose_strategy(RulePolicy::Ignore, &mut random).policy, SearchPolicy::Naive);
            assert_eq!(
                choose_strategy(RulePolicy::Enforce, &mut random).policy,
                SearchPolicy::RuleAware
            );
        }

        let families: Vec<SearchPolicy> = (0..64)
            .map(|_| choose_strategy(RulePolicy::CoinFlip, &mut random).policy)
            .collect();
        assert!(families.contains(&SearchPolicy::Naive));
        assert!(families.contains(&SearchPolicy::RuleAware));
    }

    // Tests enforced rules keep the item out of the stamped ring
    #[test]
    fn test_enforced_avoid_rule() {
        let config = SolverConfig {
            seed: 3,
            rule_policy: RulePolicy::Enforce,
            avoid_radius: 1,
        };
        let rules = [RuleTriple::avoid("A", "Wall")];

        let layout = solve_with_config(
            10,
            10,
            vec![item(2, 2, "A", CollisionClass::Soft)],
            Some(&rules),
            &config,
        )
        .expect("solve");

        let anchor = layout.report().outcomes[0].anchor.expect("placed");
        assert!((2..=6).contains(&anchor.x), "row {}", anchor.x);
        assert!((2..=6).contains(&anchor.y), "column {}", anchor.y);
        assert_eq!(layout.rules(), &rules);
    }

    // Tests re-initialization clears placements but re-stamps stored rules
    #[test]
    fn test_initialize_restamps_rules() {
        let mut layout = RoomLayout::new(10, 10, vec![item(2, 2, "A", CollisionClass::Soft)])
            .expect("layout");
        layout.add_rules(&[RuleTriple::avoid("A", "Wall")], 1).expect("rules");
        let mut random = RandomSelector::new(8);
        layout.solve(RulePolicy::Enforce, &mut random).expect("solve");
        assert_eq!(layout.grid().cells_with_occupant("A").len(), 4);

        layout.initialize().expect("initialize");

        assert!(layout.grid().cells_with_occupant("A").is_empty());
        assert!(layout.report().outcomes.is_empty());
        assert!(layout.query_cell(1, 1).expect("cell").avoids("A"));
        assert!(!layout.query_cell(4, 4).expect("cell").avoids("A"));
    }

    // Tests shuffling keeps the item set and sorting orders it by area
    #[test]
    fn test_shuffle_and_sort_items() {
        let mut layout = RoomLayout::new(50, 50, furniture_catalog()).expect("layout");
        let mut random = RandomSelector::new(12);

        layout.shuffle(&mut random).expect("shuffle");
        let mut names: Vec<&str> = layout.items().iter().map(Item::name).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["Bed", "Couch", "DeskAndChair", "Light", "Shelf"]);

        layout.sort_items_by_area_descending();
        let areas: Vec<usize> = layout.items().iter().map(Item::area).collect();
        assert!(areas.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    // Tests the observer sees each item once, in order
    #[test]
    fn test_solve_observed_reports_each_item() {
        let mut layout = RoomLayout::new(40, 40, furniture_catalog()).expect("layout");
        let mut random = RandomSelector::new(2);
        let mut seen = Vec::new();

        let report = layout
            .solve_observed(RulePolicy::Ignore, &mut random, |outcome| seen.push(outcome.index))
            .expect("solve");

        assert_eq!(report.outcomes.len(), 5);
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    // Tests hand-placed items are seen by the next solve pass
    #[test]
    fn test_manual_placement_blocks_solver() {
        let mut layout = RoomLayout::new(4, 4, vec![item(2, 2, "A", CollisionClass::Soft)])
            .expect("layout");
        layout
            .grid_mut()
            .place_item(1, 1, &item(1, 1, "Stool", CollisionClass::Soft))
            .expect("placement");
        let mut random = RandomSelector::new(0);

        let report = layout.solve(RulePolicy::Ignore, &mut random).expect("solve");

        assert_eq!(report.unplaced_count(), 1);
    }

    // Tests zero room dimensions are rejected
    #[test]
    fn test_zero_sized_room() {
        assert!(matches!(
            RoomLayout::new(0, 10, Vec::new()),
            Err(LayoutError::InvalidParameter { .. })
        ));
        assert!(solve(10, 0, Vec::new(), None, 0).is_err());
    }
}
