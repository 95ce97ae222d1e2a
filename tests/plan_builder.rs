use paintmypoem::visual::palette::{self, Rgb};
use paintmypoem::visual::plan::{build_plan, build_plan_for, VisualPlan, X_RANGE, Y_RANGE};
use paintmypoem::poem::Emotion;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

#[test]
fn element_count_is_twice_keywords_with_floor_of_eight() {
    let mut rng = StdRng::seed_from_u64(11);
    for k in 0..12 {
        let keywords: Vec<String> = (0..k).map(|i| format!("word{}", i)).collect();
        let plan = build_plan("joy", &keywords, &mut rng);
        assert_eq!(plan.elements.len(), (2 * k).max(8), "k = {}", k);
        assert_eq!(VisualPlan::element_count_for(k), (2 * k).max(8));
    }
}

#[test]
fn joy_plan_uses_joy_tables() {
    let mut rng = StdRng::seed_from_u64(42);
    let plan = build_plan("joy", &words(&["sun", "bloom"]), &mut rng);

    assert_eq!(plan.elements.len(), 8);
    assert_eq!(plan.background_color, Rgb(255, 248, 220));
    assert_eq!(plan.palette, palette::palette(Emotion::Joy).to_vec());
    assert_eq!(plan.text, words(&["sun", "bloom"]));
    assert_eq!(plan.elements[0].label, "sun");
    assert_eq!(plan.elements[1].label, "bloom");
    assert_eq!(plan.elements[2].label, "element_2");

    let pool: Vec<Rgb> = plan
        .palette
        .iter()
        .chain(plan.accent_colors.iter())
        .copied()
        .collect();
    assert!(plan.elements.iter().all(|e| pool.contains(&e.color)));
}

#[test]
fn unknown_emotion_degrades_to_neutral() {
    let mut rng = StdRng::seed_from_u64(3);
    let plan = build_plan("bewildered", &[], &mut rng);
    let shouting = build_plan("JOY", &[], &mut rng);
    assert_eq!(shouting.emotion, Emotion::Neutral);
    assert_eq!(shouting.background_color, Rgb(47, 79, 79));

    assert_eq!(plan.emotion, Emotion::Neutral);
    assert_eq!(plan.background_color, Rgb(47, 79, 79));
    assert_eq!(plan.palette, palette::palette(Emotion::Neutral).to_vec());
    assert_eq!(plan.accent_colors, palette::accent_colors(Emotion::Neutral).to_vec());
    assert_eq!(plan.elements.len(), 8);
    for (i, element) in plan.elements.iter().enumerate() {
        assert_eq!(element.label, format!("element_{}", i));
    }
}

#[test]
fn elements_stay_inside_drawable_ranges() {
    let mut rng = StdRng::seed_from_u64(99);
    for emotion in Emotion::ALL {
        let plan = build_plan_for(emotion, &words(&["a", "b", "c", "d", "e"]), &mut rng);
        for e in &plan.elements {
            assert!(X_RANGE.contains(&e.position.0));
            assert!(Y_RANGE.contains(&e.position.1));
            assert!((25..=120).contains(&e.size));
            assert!(e.alpha >= 200);
        }
        assert!(!plan.fog);
        assert_eq!(plan.style_name, None);
    }
}

#[test]
fn same_seed_same_plan() {
    let a = build_plan("sad", &words(&["rain"]), &mut StdRng::seed_from_u64(5));
    let b = build_plan("sad", &words(&["rain"]), &mut StdRng::seed_from_u64(5));
    assert_eq!(a, b);
}

#[test]
fn plan_serializes_with_type_field() {
    let plan = build_plan("love", &words(&["rose"]), &mut StdRng::seed_from_u64(1));
    let json = serde_json::to_value(&plan).unwrap();
    assert!(json["elements"][0]["type"].is_string());
    let back: VisualPlan = serde_json::from_value(json).unwrap();
    assert_eq!(back, plan);
}
