use wordcloud_rs::{
    BoxRasterizer, CloudConfig, CloudError, PlacedWord, RotateType, WordCloud, WordSpec,
    compute_placements,
};

fn test_config() -> CloudConfig {
    CloudConfig {
        width: 400.0,
        height: 300.0,
        font_size_scale: 1.0,
        ..CloudConfig::default()
    }
}

fn engine(config: CloudConfig) -> WordCloud {
    WordCloud::with_rasterizer(config, Box::new(BoxRasterizer::default())).expect("valid config")
}

fn words(pairs: &[(&str, f32)]) -> Vec<WordSpec> {
    pairs
        .iter()
        .map(|(text, weight)| WordSpec::new(*text, *weight))
        .collect()
}

fn sample_words() -> Vec<WordSpec> {
    words(&[
        ("alpha", 12.0),
        ("bravo", 11.0),
        ("charlie", 9.0),
        ("delta", 8.0),
        ("echo", 7.0),
        ("foxtrot", 6.0),
        ("golf", 5.0),
        ("hotel", 4.0),
        ("india", 3.0),
        ("juliett", 2.5),
        ("kilo", 2.0),
        ("lima", 1.0),
    ])
}

fn boxes_overlap(a: &PlacedWord, b: &PlacedWord) -> bool {
    a.left < b.left + b.width
        && b.left < a.left + a.width
        && a.top < b.top + b.height
        && b.top < a.top + a.height
}

#[test]
fn placed_words_do_not_overlap() {
    let config = test_config();
    let raster = BoxRasterizer::default();
    let (placed, _) = compute_placements(&sample_words(), &config, &raster).expect("placement");
    assert_eq!(placed.len(), 12);
    // Box masks are fully occupied rectangles, so pixel disjointness and
    // rectangle disjointness coincide.
    for i in 0..placed.len() {
        for j in (i + 1)..placed.len() {
            assert!(
                !boxes_overlap(&placed[i], &placed[j]),
                "{:?} overlaps {:?}",
                placed[i].text,
                placed[j].text
            );
        }
    }
}

#[test]
fn first_word_is_placed_at_the_anchor() {
    let config = test_config();
    let raster = BoxRasterizer::default();
    let (placed, bounds) =
        compute_placements(&words(&[("a", 10.0), ("b", 1.0)]), &config, &raster)
            .expect("placement");
    assert_eq!(placed[0].text, "a");
    assert_eq!(placed[0].left, 0.0);
    assert_eq!(placed[0].top, 0.0);
    let bounds = bounds.expect("bounded");
    assert!(bounds.left <= 0.0 && bounds.top <= 0.0);
}

#[test]
fn font_size_is_monotonic_in_weight() {
    let config = test_config();
    let raster = BoxRasterizer::default();
    let (placed, _) = compute_placements(&sample_words(), &config, &raster).expect("placement");
    for a in &placed {
        for b in &placed {
            if a.weight > b.weight {
                assert!(
                    a.font_style.font_size >= b.font_style.font_size,
                    "{:?} lighter but larger than {:?}",
                    b.text,
                    a.text
                );
            }
        }
    }
}

#[test]
fn small_weight_in_center_reverses_the_mapping() {
    let config = CloudConfig {
        small_weight_in_center: true,
        ..test_config()
    };
    let raster = BoxRasterizer::default();
    let (placed, _) = compute_placements(&sample_words(), &config, &raster).expect("placement");
    // Lightest word first, largest font.
    assert_eq!(placed[0].text, "lima");
    assert_eq!(placed[0].font_style.font_size, config.max_font_size);
    for a in &placed {
        for b in &placed {
            if a.weight > b.weight {
                assert!(a.font_style.font_size <= b.font_style.font_size);
            }
        }
    }
}

#[test]
fn equal_weights_degenerate_to_min_font_size() {
    let config = test_config();
    let raster = BoxRasterizer::default();
    let list = words(&[("one", 5.0), ("two", 5.0), ("three", 5.0)]);
    let (placed, _) = compute_placements(&list, &config, &raster).expect("placement");
    for word in &placed {
        assert_eq!(word.font_style.font_size, config.min_font_size);
    }
}

#[test]
fn identical_seeds_produce_identical_layouts() {
    let config = CloudConfig {
        rotate_type: RotateType::Random,
        seed: 7,
        ..test_config()
    };
    let cloud = engine(config);
    let input = sample_words();
    let first = cloud.run(&input).expect("first run");
    let second = cloud.run(&input).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn different_seeds_may_rotate_differently() {
    let base = CloudConfig {
        rotate_type: RotateType::Random,
        seed: 1,
        ..test_config()
    };
    let other = CloudConfig {
        seed: 2,
        ..base.clone()
    };
    let input = sample_words();
    let first = engine(base).run(&input).expect("run");
    let second = engine(other).run(&input).expect("run");
    let rotations = |placed: &[PlacedWord]| -> Vec<f32> {
        placed.iter().map(|word| word.rotate).collect()
    };
    assert_ne!(rotations(&first), rotations(&second));
}

#[test]
fn fit_keeps_words_inside_the_container() {
    let config = test_config();
    let (width, height) = (config.width, config.height);
    let placed = engine(config).run(&sample_words()).expect("run");
    for word in &placed {
        assert!(word.left >= -1e-3, "{:?} leaks left", word.text);
        assert!(word.top >= -1e-3, "{:?} leaks up", word.text);
        assert!(
            word.left + word.width <= width + 1e-3,
            "{:?} leaks right",
            word.text
        );
        assert!(
            word.top + word.height <= height + 1e-3,
            "{:?} leaks down",
            word.text
        );
    }
}

#[test]
fn fit_touches_a_container_edge_on_the_pinned_axis() {
    let config = test_config();
    let (width, height) = (config.width, config.height);
    let placed = engine(config).run(&sample_words()).expect("run");
    let union_left = placed
        .iter()
        .map(|word| word.left)
        .fold(f32::INFINITY, f32::min);
    let union_right = placed
        .iter()
        .map(|word| word.left + word.width)
        .fold(f32::NEG_INFINITY, f32::max);
    let union_top = placed
        .iter()
        .map(|word| word.top)
        .fold(f32::INFINITY, f32::min);
    let union_bottom = placed
        .iter()
        .map(|word| word.top + word.height)
        .fold(f32::NEG_INFINITY, f32::max);
    let spans_width = union_right - union_left >= width - 3.0;
    let spans_height = union_bottom - union_top >= height - 3.0;
    assert!(
        spans_width || spans_height,
        "union box {union_left},{union_top}..{union_right},{union_bottom} fills neither axis"
    );
}

#[test]
fn wide_containers_produce_wide_clouds() {
    let config = CloudConfig {
        width: 1000.0,
        height: 50.0,
        ..test_config()
    };
    let raster = BoxRasterizer::default();
    let list = words(&[
        ("word0", 5.0),
        ("word1", 5.0),
        ("word2", 5.0),
        ("word3", 5.0),
        ("word4", 5.0),
        ("word5", 5.0),
        ("word6", 5.0),
        ("word7", 5.0),
    ]);
    let (_, bounds) = compute_placements(&list, &config, &raster).expect("placement");
    let bounds = bounds.expect("bounded");
    assert!(
        bounds.width() > bounds.height(),
        "cloud {}x{} did not elongate with the container",
        bounds.width(),
        bounds.height()
    );
}

#[test]
fn empty_input_yields_empty_output() {
    let placed = engine(test_config()).run(&[]).expect("run");
    assert!(placed.is_empty());
}

#[test]
fn empty_strings_are_tolerated() {
    let list = words(&[("", 5.0), ("a", 3.0)]);
    let placed = engine(test_config()).run(&list).expect("run");
    assert_eq!(placed.len(), 2);
}

#[test]
fn offloaded_run_matches_the_synchronous_run() {
    let config = CloudConfig {
        rotate_type: RotateType::Random,
        seed: 3,
        ..test_config()
    };
    let cloud = engine(config);
    let input = sample_words();
    let sync = cloud.run(&input).expect("sync run");
    let offloaded = cloud.run_offloaded(&input).expect("offloaded run");
    assert_eq!(sync, offloaded);
}

#[test]
fn overcrowded_containers_report_the_failing_word() {
    let config = CloudConfig {
        width: 1.0,
        height: 1.0,
        min_font_size: 40.0,
        max_font_size: 40.0,
        font_size_scale: 1.0,
        ..CloudConfig::default()
    };
    let list = words(&[("stop", 10.0), ("stopper", 9.0)]);
    let err = engine(config).run(&list).expect_err("must overflow");
    match err {
        CloudError::PlacementOverflow { word } => assert_eq!(word, "stopper"),
        other => panic!("expected PlacementOverflow, got {other}"),
    }
}

#[test]
fn invalid_configurations_fail_before_layout() {
    let bad_container = CloudConfig {
        width: 0.0,
        ..CloudConfig::default()
    };
    assert!(matches!(
        WordCloud::new(bad_container),
        Err(CloudError::InvalidContainer { .. })
    ));

    let bad_fonts = CloudConfig {
        min_font_size: 40.0,
        max_font_size: 20.0,
        ..CloudConfig::default()
    };
    assert!(matches!(
        WordCloud::new(bad_fonts),
        Err(CloudError::FontSizeRange { .. })
    ));
}
