//! Golden tests for the seating kernel.
//!
//! These tests drive the full planner on small, hand-checked scenarios.

use chrono::NaiveDate;
use seating_kernel::{
    AllocationPolicy, BenchLabel, BenchWidth, Block, Floor, LayoutConfig, PlainTextExtractor,
    PlanError, RosterError, RosterFile, Room, SeatingPlan, SeatingPlanner,
};
use std::collections::BTreeSet;

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn single_room(benches: u32, width: BenchWidth) -> LayoutConfig {
    LayoutConfig {
        blocks: vec![Block::new("Main", vec![Floor::new("1", vec![Room::new("101", benches, width)])])],
        start_date: NaiveDate::from_ymd_opt(2024, 11, 4).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 11, 9).unwrap(),
        exam_timings: vec!["09:30 - 12:30".to_string()],
    }
}

fn planner(seed: u64) -> SeatingPlanner<PlainTextExtractor> {
    SeatingPlanner::new(PlainTextExtractor, AllocationPolicy::default().with_seed(seed))
}

fn csv(rows: &[(&str, &str, &str)]) -> RosterFile {
    let mut text = String::from("Name,Hall Ticket No,Branch,Contact No\n");
    for (name, ticket, branch) in rows {
        text.push_str(&format!("{name},{ticket},{branch},9000000000\n"));
    }
    RosterFile::csv("roster.csv", &text)
}

fn seat_of<'a>(plan: &'a SeatingPlan, ticket: &str) -> Option<&'a BenchLabel> {
    plan.seating_plan
        .iter()
        .find(|a| a.student.hall_ticket_number == ticket)
        .map(|a| &a.bench_number)
}

// ─────────────────────────────────────────────────────────────────────────────
// SCENARIOS
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_two_branches_share_first_bench() {
    let file = csv(&[("Asha", "A1", "A"), ("Bala", "A2", "A"), ("Chitra", "B1", "B")]);

    for seed in 0..25 {
        let plan = planner(seed)
            .plan(std::slice::from_ref(&file), &single_room(2, BenchWidth::Double))
            .await
            .unwrap();

        assert_eq!(plan.seated_count(), 3, "seed {seed}");
        assert_eq!(seat_of(&plan, "B1").map(|l| l.bench()), Some(1), "seed {seed}");

        let bench_one: Vec<_> = plan
            .seating_plan
            .iter()
            .filter(|a| a.bench_number.bench() == 1)
            .map(|a| a.student.branch.as_str())
            .collect();
        assert_eq!(bench_one.len(), 2);
        assert!(bench_one.contains(&"A") && bench_one.contains(&"B"));

        let bench_two: Vec<_> = plan
            .seating_plan
            .iter()
            .filter(|a| a.bench_number.bench() == 2)
            .collect();
        assert_eq!(bench_two.len(), 1);
        assert_eq!(bench_two[0].bench_number, BenchLabel::Left(2));
        assert_eq!(bench_two[0].student.branch, "A");
    }
}

#[tokio::test]
async fn test_header_only_file_fails_batch() {
    let file = RosterFile::csv("empty.csv", "Name,Roll No,Branch,Mobile\n");
    let err = planner(1)
        .plan(&[file], &single_room(10, BenchWidth::Double))
        .await
        .unwrap_err();

    match err {
        PlanError::Roster(e) => assert!(e.is_empty_result(), "expected empty result, got {e}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_overflow_seats_capacity_only() {
    let file = csv(&[
        ("A", "01", "CSE"),
        ("B", "02", "ECE"),
        ("C", "03", "CSE"),
        ("D", "04", "MECH"),
        ("E", "05", "ECE"),
    ]);
    let plan = planner(11)
        .plan(&[file], &single_room(2, BenchWidth::Double))
        .await
        .unwrap();

    assert_eq!(plan.seated_count(), 4);
    assert_eq!(plan.all_students.len(), 5);
    assert_eq!(plan.unseated_students().len(), 1);
    assert_eq!(plan.room_branch_summary.total(), 4);
}

#[tokio::test]
async fn test_later_bad_file_discards_whole_batch() {
    let good = csv(&[("A", "01", "CSE")]);
    let bad = RosterFile::new("scan.bin", "application/octet-stream", &b"\x00\x01\x02"[..]);
    let outcome = planner(1)
        .run(&[good, bad], &single_room(10, BenchWidth::Single))
        .await;

    assert!(outcome.plan().is_none());
    let message = outcome.error().unwrap();
    assert!(message.starts_with("scan.bin"), "message was {message}");
    assert!(message.contains("unsupported file type"));
}

#[tokio::test]
async fn test_missing_column_message_names_field() {
    let file = RosterFile::csv("r.csv", "Name,Roll No,Branch\nA,1,CSE\n");
    let err = planner(1)
        .plan(&[file], &single_room(10, BenchWidth::Single))
        .await
        .unwrap_err();

    let PlanError::Roster(RosterError::File { .. }) = &err else {
        panic!("unexpected error: {err}");
    };
    let message = err.to_string();
    assert!(message.contains("contact number"));
    assert!(message.contains("Phone"));
}

#[tokio::test]
async fn test_mixed_formats_merge() {
    let csv_file = RosterFile::csv(
        "cse.csv",
        "Roll No,Student Name,Dept,Mobile\n21C01,Asha,CSE,1\n21C02,Bala,CSE,2\n",
    );
    let pdf_text = "\
        Hall Ticket Number    Name of Student    Branch    Phone Number\n\
        21E01                 Chitra Devi        ECE       3\n\
        21E02                 Dinesh             ECE       4\n";
    let pdf_file = RosterFile::new("ece.pdf", "application/pdf", pdf_text);

    let plan = planner(5)
        .plan(&[csv_file, pdf_file], &single_room(2, BenchWidth::Double))
        .await
        .unwrap();

    let roster: Vec<_> = plan.all_students.iter().map(|s| s.hall_ticket_number.as_str()).collect();
    assert_eq!(roster, ["21C01", "21C02", "21E01", "21E02"]);

    // Two CSE and two ECE: both benches get one of each.
    for bench in 1..=2 {
        let branches: BTreeSet<_> = plan
            .seating_plan
            .iter()
            .filter(|a| a.bench_number.bench() == bench)
            .map(|a| a.student.branch.as_str())
            .collect();
        assert_eq!(branches.len(), 2, "bench {bench} pairs one branch with itself");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DETERMINISM TESTS
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_same_seed_same_fingerprint_50_runs() {
    let file = csv(&[
        ("A", "01", "CSE"),
        ("B", "02", "ECE"),
        ("C", "03", "CSE"),
        ("D", "04", "MECH"),
        ("E", "05", "ECE"),
        ("F", "06", "CIVIL"),
    ]);
    let layout = single_room(3, BenchWidth::Double);

    let first = planner(42).plan(std::slice::from_ref(&file), &layout).await.unwrap().fingerprint();
    for run in 1..50 {
        let again = planner(42).plan(std::slice::from_ref(&file), &layout).await.unwrap();
        assert_eq!(again.fingerprint(), first, "run {run} differs from run 0");
    }
}

#[tokio::test]
async fn test_assignments_sorted_by_ticket() {
    let file = csv(&[("A", "9", "X"), ("B", "10", "Y"), ("C", "1", "X"), ("D", "100", "Y")]);
    let plan = planner(3)
        .plan(&[file], &single_room(4, BenchWidth::Single))
        .await
        .unwrap();

    let tickets: Vec<_> = plan.seating_plan.iter().map(|a| a.student.hall_ticket_number.as_str()).collect();
    assert_eq!(tickets, ["1", "10", "100", "9"]);
}

#[test]
fn test_layout_json_round_trip_through_plan_output() {
    let layout: LayoutConfig = serde_json::from_str(
        r#"{
            "blocks": [{"name": "East", "floors": [{"number": 2, "rooms": [
                {"number": 201, "benches": 40, "studentsPerBench": 2}
            ]}]}],
            "startDate": "2024-11-04",
            "endDate": "2024-11-09",
            "examTimings": ["FN", "AN"]
        }"#,
    )
    .unwrap();

    let plan = planner(0).arrange(vec![], &layout, &mut rand::rng());
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["examConfig"]["startDate"], "2024-11-04");
    assert_eq!(json["examConfig"]["examTimings"][1], "AN");
    assert_eq!(json["examConfig"]["useSamePlan"], true);
    assert_eq!(json["seatingPlan"].as_array().unwrap().len(), 0);
}
