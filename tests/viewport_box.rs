use tilebox::prelude::*;

/// Integration tests for the viewport transforms, bounds and containment
/// as rendering and input code use them
#[cfg(test)]
mod viewport_box_tests {
    use super::*;

    const ROTATIONS: [f64; 5] = [0.0, 45.0, 90.0, 180.0, 270.0];

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Helper to build the 800x600 Prague view used across the tests
    fn prague(zoom: u8, rotation: f64) -> ViewportBox {
        init_logging();
        ViewportBoxBuilder::new()
            .with_pixel_dimensions(800, 600)
            .with_zoom_and_scale(zoom, 1.0)
            .with_location(50.0, 14.0)
            .with_rotation(rotation)
            .build()
            .expect("complete configuration")
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64, what: &str) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "{what}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_concrete_scenario() {
        let viewport = ViewportBoxBuilder::new()
            .with_pixel_dimensions_and_anchor(800, 600, 0.5, 0.5)
            .with_zoom_and_scale(10, 1.0)
            .with_location(50.0, 14.0)
            .with_rotation(0.0)
            .with_density(1.0)
            .build()
            .unwrap();

        assert_eq!(viewport.center_pixel_x(), 400);
        assert_eq!(viewport.center_pixel_y(), 300);

        let center = viewport.pixel_to_geo(400.0, 300.0);
        assert_close(center.lat, 50.0, 1e-9, "latitude");
        assert_close(center.lng, 14.0, 1e-9, "longitude");

        let pixel = viewport.geo_to_pixel(50.0, 14.0);
        assert_close(pixel.x, 400.0, 1e-6, "x");
        assert_close(pixel.y, 300.0, 1e-6, "y");
    }

    #[test]
    fn test_round_trip_across_rotations_and_zooms() {
        for zoom in 3..=16u8 {
            for rotation in ROTATIONS {
                let viewport = prague(zoom, rotation);
                for x in (0..=800u32).step_by(100) {
                    for y in (0..=600u32).step_by(75) {
                        let (x, y) = (f64::from(x), f64::from(y));
                        let geo = viewport.pixel_to_geo(x, y);
                        let back = viewport.geo_to_pixel(geo.lat, geo.lng);
                        assert_close(back.x, x, 1e-6, &format!("x at z{zoom} r{rotation}"));
                        assert_close(back.y, y, 1e-6, &format!("y at z{zoom} r{rotation}"));
                    }
                }
            }
        }
    }

    #[test]
    fn test_tile_round_trip() {
        let viewport = prague(12, 45.0);
        let tile = viewport.pixel_to_tile(123.0, 456.0);
        let back = viewport.tile_to_pixel(tile.x, tile.y);
        assert_close(back.x, 123.0, 1e-9, "x");
        assert_close(back.y, 456.0, 1e-9, "y");
    }

    #[test]
    fn test_zero_rotation_fast_path_matches_full_turn() {
        let straight = prague(10, 0.0);
        let full_turn = prague(10, 360.0);
        assert_eq!(full_turn.rotation(), 0.0);
        assert_eq!(straight.pixel_to_geo(10.0, 20.0), full_turn.pixel_to_geo(10.0, 20.0));

        // a rotation close to zero goes through the rotated path and lands on the same spot
        let nearly = prague(10, 1e-9);
        let a = straight.pixel_to_tile(10.0, 20.0);
        let b = nearly.pixel_to_tile(10.0, 20.0);
        assert_close(a.x, b.x, 1e-9, "tile x");
        assert_close(a.y, b.y, 1e-9, "tile y");
    }

    #[test]
    fn test_rotation_turns_the_view() {
        let viewport = prague(10, 180.0);
        // upside down: the top of the screen shows the south
        let top = viewport.pixel_to_geo(400.0, 0.0);
        let bottom = viewport.pixel_to_geo(400.0, 600.0);
        assert!(top.lat < 50.0);
        assert!(bottom.lat > 50.0);
    }

    #[test]
    fn test_rotation_normalization() {
        let mut viewport = prague(10, 0.0);
        for degrees in [-720.5, -360.0, -90.0, -1e-12, 0.0, 45.0, 359.999, 360.0, 1000.0, 1e12] {
            viewport.set_rotation(degrees);
            let rotation = viewport.rotation();
            assert!(
                (0.0..360.0).contains(&rotation),
                "rotation {degrees} normalized to {rotation}"
            );
        }
        viewport.set_rotation(-90.0);
        assert_eq!(viewport.rotation(), 270.0);
        assert_close(viewport.rotate_sin(), -1.0, 1e-12, "sin");
    }

    #[test]
    fn test_bounds_follow_every_mutation() {
        type Mutation = fn(&mut ViewportBox);
        let mutations: [(&str, Mutation); 12] = [
            ("center", |v: &mut ViewportBox| v.set_center(48.0, 11.0)),
            ("rotation", |v: &mut ViewportBox| v.set_rotation(30.0)),
            ("zoom", |v: &mut ViewportBox| v.set_zoom(11)),
            ("zoom and scale", |v: &mut ViewportBox| v.set_zoom_and_scale(10, 0.5)),
            ("zoom scale animation", |v: &mut ViewportBox| {
                v.set_zoom_scale_and_animation(10, 1.0, 0.25)
            }),
            ("zoom and animation", |v: &mut ViewportBox| v.set_zoom_and_animation(9, 0.5)),
            ("animation", |v: &mut ViewportBox| v.set_zoom_animation(-0.5)),
            ("dimensions", |v: &mut ViewportBox| v.set_pixel_dimensions(1024, 768)),
            ("dimensions with anchor", |v: &mut ViewportBox| {
                v.set_pixel_dimensions_with_anchor(800, 600, 0.5, 0.8)
            }),
            ("grow", |v: &mut ViewportBox| v.grow_pixel_dimensions(50, 25)),
            ("anchor", |v: &mut ViewportBox| v.set_center_anchor(0.2, 0.2)),
            ("density", |v: &mut ViewportBox| v.set_density(3.0)),
        ];

        for (name, mutate) in mutations {
            let mut cached = prague(10, 0.0);
            let before = cached.geo_bounds();
            assert!(cached.is_geometry_cached());

            let mut fresh = prague(10, 0.0);
            mutate(&mut cached);
            mutate(&mut fresh);
            assert!(!cached.is_geometry_cached(), "{name} kept a stale cache");

            assert_eq!(cached.tile_bounds(), fresh.tile_bounds(), "{name}");
            assert_eq!(cached.geo_bounds(), fresh.geo_bounds(), "{name}");
            if name != "density" {
                assert_ne!(cached.geo_bounds(), before, "{name} did not move the bounds");
            }
        }
    }

    #[test]
    fn test_geo_bounds_idempotent() {
        let viewport = prague(13, 45.0);
        let first = viewport.geo_bounds();
        let second = viewport.geo_bounds();
        assert_eq!(first.north().to_bits(), second.north().to_bits());
        assert_eq!(first.south().to_bits(), second.south().to_bits());
        assert_eq!(first.east().to_bits(), second.east().to_bits());
        assert_eq!(first.west().to_bits(), second.west().to_bits());
    }

    #[test]
    fn test_bounds_enclose_rotated_corners() {
        for rotation in ROTATIONS {
            let viewport = prague(10, rotation);
            let bounds = viewport.tile_bounds();
            for corner in viewport.tile_corners() {
                assert!(
                    corner.x >= bounds.left() && corner.x <= bounds.right(),
                    "rotation {rotation}"
                );
                assert!(
                    corner.y >= bounds.top() && corner.y <= bounds.bottom(),
                    "rotation {rotation}"
                );
            }
            assert_eq!(viewport.top_left_tile(), viewport.tile_corners()[0]);

            let geo = viewport.geo_bounds();
            assert!(geo.north() > geo.south());
            assert!(geo.east() > geo.west());
            assert!(geo.south() <= 50.0 && 50.0 <= geo.north());
            assert!(geo.west() <= 14.0 && 14.0 <= geo.east());
        }

        // a 45 degree turn widens the enclosing rectangle
        let straight = prague(10, 0.0).tile_bounds();
        let turned = prague(10, 45.0).tile_bounds();
        assert!(turned.width() > straight.width());
        assert!(turned.height() > straight.height());
    }

    #[test]
    fn test_corner_geo_accessors() {
        let viewport = prague(10, 0.0);
        let top_left = viewport.top_left_geo();
        let bottom_right = viewport.bottom_right_geo();
        assert_eq!(top_left, viewport.pixel_to_geo(0.0, 0.0));
        assert_eq!(bottom_right, viewport.pixel_to_geo(800.0, 600.0));

        let bounds = viewport.geo_bounds();
        assert_close(bounds.north(), top_left.lat, 1e-12, "north");
        assert_close(bounds.west(), top_left.lng, 1e-12, "west");
        assert_close(bounds.south(), bottom_right.lat, 1e-12, "south");
        assert_close(bounds.east(), bottom_right.lng, 1e-12, "east");
    }

    #[test]
    fn test_self_containment() {
        for zoom in [1u8, 5, 10, 18] {
            for rotation in ROTATIONS {
                let viewport = prague(zoom, rotation);
                assert!(viewport.contains_geo_point(50.0, 14.0));
                let tile = viewport.center_tile();
                assert!(viewport.contains_tile_point(tile.x, tile.y));
            }
        }

        let mut tiny = prague(10, 0.0);
        tiny.set_pixel_dimensions(1, 1);
        assert!(tiny.contains_geo_point(50.0, 14.0));
    }

    #[test]
    fn test_geo_containment_edges() {
        let viewport = prague(10, 0.0);
        let top_left = viewport.pixel_to_geo(0.0, 0.0);
        assert!(viewport.contains_geo_point(top_left.lat, top_left.lng));
        assert!(!viewport.contains_geo_point(0.0, 0.0));
        assert!(!viewport.contains_geo_point(50.0, 20.0));
    }

    #[test]
    fn test_identical_viewport_contains_itself() {
        let a = prague(10, 0.0);
        let b = prague(10, 0.0);
        assert!(a.contains_viewport(&b).unwrap());
        assert!(a.contains_viewport(&a).unwrap());
    }

    #[test]
    fn test_viewport_containment() {
        let outer = prague(10, 0.0);
        let mut inner = prague(10, 30.0);
        inner.set_pixel_dimensions(200, 200);
        assert!(outer.contains_viewport(&inner).unwrap());
        assert!(!inner.contains_viewport(&outer).unwrap());

        let mut shifted = prague(10, 0.0);
        shifted.set_center(50.0, 14.5);
        assert!(!outer.contains_viewport(&shifted).unwrap());
    }

    #[test]
    fn test_viewport_containment_leaves_argument_untouched() {
        let outer = prague(10, 0.0);
        let inner = prague(10, 10.0);
        assert!(!inner.is_geometry_cached());
        let _ = outer.contains_viewport(&inner).unwrap();
        assert!(!inner.is_geometry_cached());
    }

    #[test]
    fn test_viewport_containment_requires_same_zoom() {
        let a = prague(10, 0.0);
        let b = prague(11, 0.0);
        let err = a.contains_viewport(&b).unwrap_err();
        assert!(matches!(
            err,
            ViewportError::IncompatibleViewport {
                expected: 10,
                found: 11
            }
        ));
    }

    #[test]
    fn test_distance_between_pixels() {
        let viewport = prague(10, 0.0);
        // 512 pixels is one tile at zoom 10 with scale 1, ~25.1 km at 50 degrees north
        let distance = viewport.distance_between_pixels(144.0, 300.0, 656.0, 300.0);
        assert_close(distance, 25_128.0, 50.0, "distance");
        assert_eq!(viewport.distance_between_pixels(10.0, 10.0, 10.0, 10.0), 0.0);

        // rotation does not change distances on screen
        let turned = prague(10, 90.0);
        let turned_distance = turned.distance_between_pixels(400.0, 44.0, 400.0, 556.0);
        assert_close(turned_distance, distance, 50.0, "rotated distance");
    }

    #[test]
    fn test_zoom_animation_scales_the_view() {
        let mut viewport = prague(10, 0.0);
        let width = viewport.tile_bounds().width();
        viewport.set_zoom_animation(1.0);
        assert!(viewport.is_zoom_animated());
        assert_close(viewport.tile_bounds().width(), width / 2.0, 1e-9, "animated width");
        viewport.set_zoom_animation(0.0);
        assert_close(viewport.tile_bounds().width(), width, 1e-9, "settled width");
    }

    #[test]
    fn test_grow_keeps_center_geography() {
        let mut viewport = prague(10, 25.0);
        let anchor_before = viewport.pixel_to_geo(400.0, 300.0);
        viewport.grow_pixel_dimensions(100, 50);
        assert_eq!(viewport.pixel_width(), 1000);
        assert_eq!(viewport.pixel_height(), 700);
        let anchor_after = viewport.pixel_to_geo(500.0, 350.0);
        assert_close(anchor_after.lat, anchor_before.lat, 1e-12, "lat");
        assert_close(anchor_after.lng, anchor_before.lng, 1e-12, "lng");
    }

    #[test]
    fn test_anchor_moves_center_pixel() {
        let mut viewport = prague(10, 0.0);
        viewport.set_center_anchor(0.5, 0.75);
        assert_eq!(viewport.center_pixel(), Point::new(400.0, 450.0));
        let center = viewport.pixel_to_geo(400.0, 450.0);
        assert_close(center.lat, 50.0, 1e-9, "lat");
        assert_eq!(viewport.pixel_width(), 800);
    }

    #[test]
    fn test_builder_missing_location() {
        let err = ViewportBoxBuilder::new()
            .with_pixel_dimensions(800, 600)
            .with_zoom_and_scale(10, 1.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ViewportError::MissingConfiguration(ConfigGroup::Location)
        ));
        assert!(err.to_string().contains("location"));
    }

    #[test]
    fn test_builder_from_json_options() {
        let options = ViewportOptions::from_json(r#"{ "density": 2.5, "rotation": 450 }"#).unwrap();
        let viewport = ViewportBoxBuilder::new()
            .with_options(&options)
            .with_pixel_dimensions(640, 480)
            .with_zoom_and_scale(14, 0.0)
            .with_location(50.0, 14.0)
            .build()
            .unwrap();
        assert_eq!(viewport.density(), 2.5);
        assert_eq!(viewport.rotation(), 90.0);
        assert_eq!(viewport.center_pixel(), Point::new(320.0, 240.0));
    }

    #[test]
    fn test_copy_shared_with_another_thread() {
        fn assert_send<T: Send>() {}
        assert_send::<ViewportBox>();

        let viewport = prague(10, 45.0);
        let expected = viewport.geo_bounds();
        let snapshot = viewport.clone();
        let handle = std::thread::spawn(move || {
            let mut snapshot = snapshot;
            let bounds = snapshot.geo_bounds();
            snapshot.set_center(0.0, 0.0);
            bounds
        });
        let bounds = handle.join().unwrap();
        assert_eq!(bounds, expected);
        assert_eq!(viewport.center(), LatLng::new(50.0, 14.0));
    }
}
