#[cfg(test)]
mod tests {
    use roomlayout::algorithm::random::RandomSelector;
    use roomlayout::algorithm::solver::{RoomLayout, RulePolicy};
    use roomlayout::io::progress::ProgressManager;
    use roomlayout::spatial::items::furniture_catalog;

    // Tests item counts and the best attempt are tracked without drawing
    #[test]
    fn test_progress_tracks_attempts() {
        let mut manager = ProgressManager::hidden();
        manager.initialize(2, 5);
        let mut random = RandomSelector::new(1);

        for attempt in 0..2 {
            manager.start_attempt(attempt);
            let mut layout = RoomLayout::new(200, 200, furniture_catalog()).expect("layout");
            let report = layout
                .solve_observed(RulePolicy::Ignore, &mut random, |outcome| {
                    manager.record_item(outcome);
                })
                .expect("solve")
                .clone();
            assert_eq!(manager.items_recorded(), 5);
            manager.complete_attempt(&report);
        }

        assert_eq!(manager.best_unplaced(), Some(0));
        manager.finish();
    }

    // Tests an uninitialized manager ignores updates
    #[test]
    fn test_uninitialized_manager() {
        let manager = ProgressManager::hidden();

        assert_eq!(manager.items_recorded(), 0);
        assert_eq!(manager.best_unplaced(), None);
        manager.finish();
    }
}
