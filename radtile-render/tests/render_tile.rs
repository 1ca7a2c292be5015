use radtile_model::data::{Cut, Radial};
use radtile_render::render_tile;

fn uniform_cut(code: u8) -> Cut {
    let mut cut = Cut::new("KLVX".to_string(), 38.0, -85.9, 224.0, 212, 0);

    let mut azimuth = 0.0f32;
    let mut azimuth_number = 1;
    while azimuth < 360.0 {
        let radial = Radial::new(
            azimuth_number,
            azimuth,
            0.5,
            2125.0,
            250.0,
            2.0,
            66.0,
            vec![code; 460],
        );
        cut.push(0, radial).expect("azimuths are distinct");

        azimuth += 0.5;
        azimuth_number += 1;
    }

    cut
}

#[test]
fn all_threshold_cut_renders_fully_transparent() {
    let cut = uniform_cut(0);

    let tile = render_tile(&cut, 0, 0, 1);
    assert!(!tile.has_significant_data());
    assert!(tile.pixels().chunks_exact(4).all(|pixel| pixel[3] == 0));
}

#[test]
fn reflective_cut_renders_significant_pixels_over_the_site() {
    // Gate code 200 decodes to (200 - 66) / 2 = 67 dBZ, well into the table.
    let cut = uniform_cut(200);

    // The zoom 6 tile containing the site.
    let tile = render_tile(&cut, 16, 24, 6);
    assert!(tile.has_significant_data());

    let lit_pixels = tile
        .pixels()
        .chunks_exact(4)
        .filter(|pixel| pixel[3] > 0)
        .count();
    assert!(lit_pixels > 100, "only {lit_pixels} pixels lit");
}

#[test]
fn tile_outside_coverage_is_transparent() {
    let cut = uniform_cut(200);

    // A zoom 6 tile over the eastern Atlantic, far outside the 115 km range.
    let tile = render_tile(&cut, 30, 24, 6);
    assert!(!tile.has_significant_data());
}

#[test]
fn tile_converts_to_an_image() {
    let cut = uniform_cut(0);

    let tile = render_tile(&cut, 0, 0, 1);
    let image = tile.into_image().expect("dimensions match");
    assert_eq!(image.dimensions(), (256, 256));
}
