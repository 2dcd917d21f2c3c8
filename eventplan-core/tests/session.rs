use eventplan_core::{
    generate_guests, CapacityPolicy, EventConfig, EventSession, Guest, SessionError, UndoPolicy,
    Venue,
};

#[test]
fn full_planning_workflow() {
    let mut session = EventSession::new();
    for (name, group) in [
        ("Alice", "family"),
        ("Bob", "family"),
        ("Charlie", "friends"),
        ("Diana", "friends"),
        ("Eve", "coworkers"),
    ] {
        session.add_guest(Guest::new(name, group));
    }
    assert_eq!(session.guests().count(), 5);

    let venue = session.select_venue(2000.0).unwrap().cloned().unwrap();
    assert_eq!(venue.name, "Community Hall");

    let chart = session.generate_seating().unwrap();
    assert_eq!(chart.seated_count(), 5);
    assert_eq!(chart.table_count(), 5);

    session.add_task("Book venue");
    session.add_task("Send invitations");
    assert_eq!(session.add_task("Order catering"), 3);
    assert_eq!(
        session.execute_next_task().unwrap().description,
        "Book venue"
    );
    assert_eq!(session.remaining_tasks(), 2);

    let summary = session.summary();
    assert_eq!(summary.guest_count, 5);
    assert_eq!(summary.groups.get("family"), Some(&2));
    assert_eq!(summary.groups.get("coworkers"), Some(&1));
    assert_eq!(summary.venue.map(|v| v.name), Some("Community Hall".to_string()));
    assert_eq!(summary.pending_tasks, 2);
    assert_eq!(summary.completed_tasks, 1);
}

#[test]
fn guest_management() {
    let mut session = EventSession::new();
    session.add_guest(Guest::new("John", "family"));
    session.add_guest(Guest::new("Jane", "friends"));
    session.add_guest(Guest::new("Jack", "coworkers"));

    assert_eq!(session.find_guest("Jane").unwrap().group_tag, "friends");
    assert!(session.remove_guest("Jack"));
    assert_eq!(session.guests().count(), 2);
    assert!(session.find_guest("Jack").is_none());
    assert!(!session.remove_guest("Jack"));
}

#[test]
fn generated_guests_are_all_seated() {
    let mut session = EventSession::new();
    assert_eq!(session.load_sample_data(15), 15);
    assert!(session.select_venue(3000.0).unwrap().is_some());
    assert_eq!(session.generate_seating().unwrap().seated_count(), 15);
}

#[test]
fn empty_session() {
    let mut session = EventSession::new();
    assert_eq!(session.guests().count(), 0);
    assert_eq!(session.remaining_tasks(), 0);
    assert!(session.execute_next_task().is_none());
    assert!(session.undo_last_task().is_none());
    assert!(matches!(
        session.select_venue(1000.0),
        Err(SessionError::NoGuests)
    ));

    let summary = session.summary();
    assert_eq!(summary.guest_count, 0);
    assert!(summary.groups.is_empty());
    assert!(summary.venue.is_none());
}

#[test]
fn config_drives_policies_and_catalog() {
    let mut config = EventConfig::default();
    config.seating.capacity_policy = CapacityPolicy::Strictest;
    config.ledger.undo_policy = UndoPolicy::Requeue;
    config.venues = vec![Venue::new("Integration Venue", 2000.0, 3, 4, 8)];

    let mut session = EventSession::from_config(&config);
    assert_eq!(session.venues().len(), 1);
    assert_eq!(session.capacity_policy(), CapacityPolicy::Strictest);

    session.extend_guests(generate_guests(4));
    session.choose_venue("Integration Venue").unwrap();
    assert!(matches!(
        session.generate_seating(),
        Err(SessionError::Seating(_))
    ));

    session.add_task("Task 1");
    session.execute_next_task();
    session.undo_last_task();
    assert_eq!(session.remaining_tasks(), 1);
}

#[test]
fn summary_and_chart_serialize_for_reports() {
    let mut session = EventSession::new();
    session.add_guest(Guest::new("Alice", "family"));
    session.add_guest(Guest::new("Bob", "friends"));
    session.add_task("Send invitations");

    let summary = serde_json::to_value(session.summary()).unwrap();
    assert_eq!(summary["guest_count"], 2);
    assert_eq!(summary["groups"]["family"], 1);
    assert!(summary.get("venue").is_none());

    session.choose_venue("Community Hall").unwrap();
    let chart = serde_json::to_value(session.generate_seating().unwrap()).unwrap();
    assert_eq!(chart["1"][0]["name"], "Alice");
    assert_eq!(chart["2"], serde_json::json!([]));
}
