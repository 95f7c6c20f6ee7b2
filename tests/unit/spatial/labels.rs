#[cfg(test)]
mod tests {
    use roomlayout::spatial::labels::{LabelSet, LabelTable};

    // Tests interning is idempotent and resolves back to the name
    #[test]
    fn test_intern_and_resolve() {
        let mut table = LabelTable::new();
        let bed = table.intern("Bed");
        let again = table.intern("Bed");
        let desk = table.intern("Desk");

        assert_eq!(bed, again);
        assert_ne!(bed, desk);
        assert_eq!(table.resolve(desk), "Desk");
        assert_eq!(table.lookup("Bed"), Some(bed));
        assert_eq!(table.lookup("Couch"), None);
        assert_eq!(table.len(), 2);
    }

    // Tests set membership grows with label index
    #[test]
    fn test_label_set_membership() {
        let mut table = LabelTable::new();
        let labels: Vec<_> = ["A", "B", "C", "D"]
            .iter()
            .map(|name| table.intern(name))
            .collect();

        let mut set = LabelSet::new();
        assert!(set.is_empty());
        assert!(set.insert(labels[3]));
        assert!(set.insert(labels[1]));
        assert!(!set.insert(labels[3]));

        assert!(set.contains(labels[1]));
        assert!(!set.contains(labels[0]));
        assert!(!set.contains(labels[2]));
        assert_eq!(set.len(), 2);
        assert_eq!(table.resolve_set(&set), vec!["B".to_string(), "D".to_string()]);

        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(labels[3]));
    }
}
