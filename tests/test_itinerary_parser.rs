use lazy_wander::{parse_itinerary, GrammarVersion, GroundingLink, Metrics};

fn build_text(days: usize, places_per_day: usize) -> String {
    let mut text = String::from("[TITLE] Generated\n[STARS] 3\n");
    for d in 1..=days {
        text.push_str(&format!("[DAY {}]\n", d));
        for p in 1..=places_per_day {
            text.push_str(&format!(
                "[PLACE] Place {}-{}\n[DESC] Desc {}\n[TIP] Tip {}\n\n",
                d, p, p, p
            ));
        }
    }
    text
}

#[test]
fn test_day_and_activity_counts() {
    for (days, places) in [(1, 1), (2, 3), (3, 5)] {
        let itinerary = parse_itinerary(&build_text(days, places), &[], GrammarVersion::Extended);
        assert_eq!(itinerary.days.len(), days);
        for (i, day) in itinerary.days.iter().enumerate() {
            assert_eq!(day.day, (i + 1).to_string());
            assert_eq!(day.activities.len(), places);
            assert_eq!(day.activities[0].name, format!("Place {}-1", i + 1));
            assert_eq!(day.activities[places - 1].tip, format!("Tip {}", places));
        }
    }
}

#[test]
fn test_example_scenario() {
    let text = "[TITLE] Test Trip
[STARS] 4
[COMMENT] Fine, I guess.
[DAY 1]
[PLACE] Cafe A
[DESC] Nice view
[TIP] Sit by window
[PLACE] X
[DESC] too short name, should be dropped
[DAY 2]
[PLACE] Museum B
[DESC] Quiet
";
    let links = vec![GroundingLink::new("Cafe A", "https://maps/a")];
    let itinerary = parse_itinerary(text, &links, GrammarVersion::Extended);

    assert_eq!(itinerary.title, "Test Trip");
    assert_eq!(itinerary.comment, "Fine, I guess.");
    assert!(matches!(&itinerary.metrics, Metrics::Extended(m) if m.stars == 4));

    assert_eq!(itinerary.days.len(), 2);
    assert_eq!(itinerary.days[0].activities.len(), 1);
    assert_eq!(itinerary.days[0].activities[0].name, "Cafe A");
    assert_eq!(
        itinerary.days[0].activities[0].map_link,
        Some(GroundingLink::new("Cafe A", "https://maps/a"))
    );
    assert_eq!(itinerary.days[1].activities.len(), 1);
    assert_eq!(itinerary.days[1].activities[0].name, "Museum B");
    assert!(itinerary.days[1].activities[0].map_link.is_none());
}

#[test]
fn test_links_are_case_insensitive_and_bidirectional() {
    let text = "[DAY 1]\n[PLACE] GYEONGBOKGUNG\n[PLACE] Namsan Tower Observatory\n[PLACE] Bukchon\n";
    let links = vec![
        GroundingLink::new("Gyeongbokgung Palace", "https://maps/palace"),
        GroundingLink::new("namsan tower", "https://maps/tower"),
    ];
    let itinerary = parse_itinerary(text, &links, GrammarVersion::Extended);
    let activities = &itinerary.days[0].activities;

    assert_eq!(activities[0].map_link.as_ref().unwrap().uri, "https://maps/palace");
    assert_eq!(activities[1].map_link.as_ref().unwrap().uri, "https://maps/tower");
    assert!(activities[2].map_link.is_none());
}

#[test]
fn test_no_links_means_no_map_links() {
    let itinerary = parse_itinerary(&build_text(2, 2), &[], GrammarVersion::Extended);
    assert!(itinerary
        .days
        .iter()
        .flat_map(|d| &d.activities)
        .all(|a| a.map_link.is_none()));
}

#[test]
fn test_unknown_tags_are_ignored() {
    let text = "[TITLE] Trip\n[WEATHER] rainy\n[DAY 1]\n[PLACE] Cafe A\n[PRICE] 5000\n[DESC] Cozy\n";
    let itinerary = parse_itinerary(text, &[], GrammarVersion::Extended);
    let cafe = &itinerary.days[0].activities[0];
    assert_eq!(cafe.name, "Cafe A");
    assert_eq!(cafe.desc, "Cozy");
}

#[test]
fn test_llm_artifacts_do_not_leak() {
    let text = "google_maps(query=\"lazy cafes in Seoul\")\n```tool_code\nprint(google_maps.search(\"[DAY 5]\"))\n```\n\
                [TITLE] Couch Adjacent\n[DAY 1]\n[PLACE] Cafe A\n[DESC] Sofa seats\n";
    let itinerary = parse_itinerary(text, &[], GrammarVersion::Extended);
    assert_eq!(itinerary.title, "Couch Adjacent");
    assert_eq!(itinerary.days.len(), 1);
    assert_eq!(itinerary.days[0].day, "1");
    assert_eq!(itinerary.days[0].activities[0].desc, "Sofa seats");
}

#[test]
fn test_same_input_same_structure() {
    let text = build_text(2, 3);
    let links = vec![GroundingLink::new("Place 1-2", "https://maps/12")];
    let first = parse_itinerary(&text, &links, GrammarVersion::Lazy);
    let second = parse_itinerary(&text, &links, GrammarVersion::Lazy);
    assert_eq!(first, second);
}
