use isocheck_core::{binarize, BinaryBuffer, BoundingBox, PixelBuffer};
use isocheck_template::{
    iou, match_binary, match_binary_mirrored, nms, MatchStrategy, TemplateMatchParams,
    TemplateMatcher,
};

fn speckle(width: usize, height: usize, seed: u64) -> PixelBuffer {
    let mut state = seed;
    PixelBuffer::from_fn(width, height, |_, _| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let v = if (state >> 63) == 1 { 0 } else { 255 };
        [v, v, v, 255]
    })
}

#[test]
fn cropped_window_is_found_where_it_was_cut() {
    let candidate = binarize(&speckle(24, 20, 7), 2.0);
    let template = BinaryBuffer::try_from(
        candidate
            .as_pixels()
            .crop(3, 4, 6, 5)
            .expect("crop inside candidate"),
    )
    .expect("cropped binary stays binary");

    let boxes = match_binary(&candidate, &template, 0);
    assert_eq!(boxes, vec![BoundingBox::new(3, 4, 6, 5)]);

    let with_flip = match_binary_mirrored(&candidate, &template, 0, true);
    assert_eq!(with_flip[0], BoundingBox::new(3, 4, 6, 5));
    let flipped = template.mirrored_horizontal();
    for b in &with_flip[1..] {
        // anything extra must be a genuine hit of the flipped template
        assert!(match_binary(&candidate, &flipped, 0).contains(b));
    }
}

#[test]
fn symmetric_template_matches_mirror_image_positions() {
    // chevron symmetric about its vertical axis
    let chevron = |x: usize, y: usize| y + x == 4 || x == y + 4;
    let template = BinaryBuffer::from_fn(9, 5, chevron);
    assert_eq!(template.mirrored_horizontal(), template);

    let candidate = BinaryBuffer::from_fn(30, 12, |x, y| {
        (2..11).contains(&x) && (1..6).contains(&y) && chevron(x - 2, y - 1)
    });
    let plain = match_binary_mirrored(&candidate, &template, 1, false);
    let both = match_binary_mirrored(&candidate, &template, 1, true);
    assert_eq!(plain, both);

    // the mirrored scene puts the hit at width - x - template width
    let mirrored_scene = candidate.mirrored_horizontal();
    let mirrored = match_binary_mirrored(&mirrored_scene, &template, 1, true);
    let expected: Vec<_> = plain
        .iter()
        .map(|b| BoundingBox::new(30 - b.x - b.width, b.y, b.width, b.height))
        .collect();
    let mut got = mirrored.clone();
    got.sort_by_key(|b| (b.y, b.x));
    let mut want = expected;
    want.sort_by_key(|b| (b.y, b.x));
    assert_eq!(got, want);
}

#[test]
fn tolerant_matches_collapse_under_nms() {
    let ink = [0, 0, 0, 255];
    let paper = [255, 255, 255, 255];
    // a one-pixel bar still matches when shifted one step along its length
    let candidate = PixelBuffer::from_fn(40, 10, |x, y| {
        if (10..30).contains(&x) && y == 4 {
            ink
        } else {
            paper
        }
    });
    let template = PixelBuffer::from_fn(20, 4, |_, y| if y == 2 { ink } else { paper });

    let params = TemplateMatchParams {
        strategy: MatchStrategy::default(),
        iou_threshold: 0.3,
    };
    let set = TemplateMatcher::new(params)
        .find(&candidate, &[template], 2.0)
        .expect("non-empty candidate");
    // windows at x = 9, 10, 11 each differ in one pixel; row-major order keeps x = 9
    assert_eq!(set.raw_count, 3);
    assert_eq!(set.boxes.len(), 1);
    assert_eq!((set.boxes[0].x, set.boxes[0].y), (9, 2));
    for (i, a) in set.boxes.iter().enumerate() {
        for b in &set.boxes[i + 1..] {
            assert!(iou(a, b) <= 0.3);
        }
    }
    assert_eq!(nms(&set.boxes, 0.3), set.boxes);
}
