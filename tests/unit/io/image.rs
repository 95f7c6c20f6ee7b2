//! Tests for palette handling and PNG export

#[cfg(test)]
mod tests {
    use roomlayout::io::image::{
        BLOCKED_COLOR, ColorAssignment, EMPTY_COLOR, Palette, export_layout_as_png, render_layout,
    };
    use roomlayout::spatial::grid::RoomGrid;
    use roomlayout::spatial::items::{CollisionClass, Item};
    use tempfile::TempDir;

    fn soft(name: &str) -> Item {
        Item::new(1, 1, name, CollisionClass::Soft).expect("valid item")
    }

    // Tests pixels follow cell coordinates with length as image width
    #[test]
    fn test_render_layout_colors() {
        let mut grid = RoomGrid::initialize(4, 6).expect("grid");
        grid.place_item(1, 2, &soft("Couch")).expect("placement");
        grid.place_item(2, 3, &soft("Mystery")).expect("placement");

        let img = render_layout(&grid, &Palette::default()).expect("render");

        assert_eq!(img.dimensions(), (4, 6));
        assert_eq!(img.get_pixel(0, 0).0, BLOCKED_COLOR);
        assert_eq!(img.get_pixel(1, 1).0, EMPTY_COLOR);
        assert_eq!(img.get_pixel(1, 2).0, [161, 61, 45]);
        assert_eq!(img.get_pixel(2, 3).0, EMPTY_COLOR);
    }

    // Tests overlapping soft items render as hard-blocked
    #[test]
    fn test_render_overlap_as_blocked() {
        let mut grid = RoomGrid::initialize(5, 5).expect("grid");
        grid.place_item(2, 2, &soft("Bed")).expect("placement");
        grid.place_item(2, 2, &soft("Shelf")).expect("placement");

        let img = render_layout(&grid, &Palette::default()).expect("render");

        assert_eq!(img.get_pixel(2, 2).0, BLOCKED_COLOR);
    }

    // Tests export creates missing directories and writes a readable PNG
    #[test]
    fn test_export_layout_as_png() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("out").join("room.png");
        let grid = RoomGrid::initialize(8, 5).expect("grid");

        export_layout_as_png(&grid, &Palette::default(), &path).expect("export");

        let decoded = ::image::open(&path).expect("decode").to_rgb8();
        assert_eq!(decoded.dimensions(), (8, 5));
        assert_eq!(decoded.get_pixel(3, 2).0, EMPTY_COLOR);
    }

    #[test]
    fn test_palette_entries() {
        let mut palette = Palette::default();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.color_for("Light"), Some([255, 255, 0]));

        palette.insert("Light", [1, 1, 1]);
        palette.insert("Rug", [9, 9, 9]);
        assert_eq!(palette.color_for("Light"), Some([1, 1, 1]));
        assert_eq!(palette.len(), 6);
        assert!(Palette::empty().is_empty());
    }

    // Tests colour override parsing
    #[test]
    fn test_parse_color_assignment() {
        let assignment: ColorAssignment = " Rug = 10, 20 ,30".parse().expect("valid colour");
        assert_eq!(assignment.name, "Rug");
        assert_eq!(assignment.rgb, [10, 20, 30]);

        for text in ["Rug", "=1,2,3", "Rug=1,2", "Rug=1,2,3,4", "Rug=1,2,300"] {
            assert!(text.parse::<ColorAssignment>().is_err(), "{text} should not parse");
        }
    }
}
