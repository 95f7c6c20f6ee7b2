#[cfg(test)]
mod tests {
    use roomlayout::LayoutError;
    use roomlayout::io::error::{invalid_parameter, out_of_range};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests messages name the offending coordinate and grid size
    #[test]
    fn test_out_of_range_display() {
        let err = out_of_range(7, 3, (5, 4));
        assert_eq!(err.to_string(), "Cell (7, 3) is outside the 5x4 grid");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_placement_and_parameter_display() {
        let failure = LayoutError::PlacementFailure {
            item: "Bed".to_string(),
            index: 2,
        };
        assert_eq!(failure.to_string(), "No feasible anchor for item 'Bed' (position 2)");

        let invalid = invalid_parameter("width", &0, &"must be positive");
        assert_eq!(invalid.to_string(), "Rejected width '0': must be positive");
    }

    // Tests I/O failures keep their cause
    #[test]
    fn test_io_source() {
        let err = LayoutError::Io {
            path: PathBuf::from("/tmp/out"),
            action: "create directory",
            source: std::io::Error::other("disk full"),
        };

        assert_eq!(err.to_string(), "Could not create directory '/tmp/out': disk full");
        assert_eq!(err.source().map(ToString::to_string), Some("disk full".to_string()));
    }
}
