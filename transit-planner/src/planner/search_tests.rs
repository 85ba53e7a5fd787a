//! Tests for multi-profile planning and its invariants.

use super::*;
use crate::domain::{Line, Profile, RoutePlan};
use crate::graph::StationGraph;
use crate::status::LiveStatus;
use proptest::prelude::*;

fn scenario_lines() -> Vec<Line> {
    vec![
        Line::new("L1", Some("Metro".to_string()), ["A", "B", "C"]),
        Line::new("L2", Some("CPTM".to_string()), ["C", "D", "E"]),
    ]
}

fn plan_with(lines: &[Line], status: &LiveStatus, from: &str, to: &str) -> Result<RoutePlan, SearchError> {
    let costs = CostConfig::default();
    let graph = StationGraph::build(lines, costs.base_travel_time);
    Planner::new(&graph, status, &costs).plan(from, to)
}

#[test]
fn plans_across_a_transfer() {
    let plan = plan_with(&scenario_lines(), &LiveStatus::empty(), "A", "E").unwrap();

    assert_eq!(plan.profile, Profile::Fast);
    assert_eq!(plan.path, vec!["A", "B", "C", "D", "E"]);
    assert_eq!(plan.transfers.len(), 1);
    assert_eq!(plan.transfers[0].station, "C");
    assert_eq!(plan.transfers[0].from_line, "L1");
    assert_eq!(plan.transfers[0].to_line, "L2");
}

#[test]
fn disruption_raises_cost_per_degraded_edge() {
    let baseline = plan_with(&scenario_lines(), &LiveStatus::empty(), "A", "C").unwrap();
    assert_eq!(baseline.estimated_cost, 6);

    let status = LiveStatus::from_records([("L1", "Operação com velocidade reduzida")], None);
    let degraded = plan_with(&scenario_lines(), &status, "A", "C").unwrap();
    assert_eq!(degraded.estimated_cost, 6 + 2 * 10);
    assert_eq!(degraded.path, baseline.path);
}

#[test]
fn same_station_is_zero_hop_fast_plan() {
    let plan = plan_with(&scenario_lines(), &LiveStatus::empty(), "B", "B").unwrap();
    assert_eq!(plan, RoutePlan::stationary("B", Profile::Fast));
}

#[test]
fn disconnected_station_has_no_route() {
    let mut lines = scenario_lines();
    lines.push(Line::new("Island", None, ["Z"]));

    for other in ["A", "C", "E"] {
        assert_eq!(
            plan_with(&lines, &LiveStatus::empty(), "Z", other),
            Err(SearchError::NoRoute {
                origin: "Z".into(),
                destination: other.into(),
            })
        );
    }
}

#[test]
fn unknown_station_is_rejected() {
    let err = plan_with(&scenario_lines(), &LiveStatus::empty(), "A", "Nowhere").unwrap_err();
    assert_eq!(err, SearchError::UnknownStation("Nowhere".into()));
}

#[test]
fn cheapest_profile_is_selected() {
    // Circular line with a spur at T. The simple profile detours around T,
    // but the fast profile's path through T is cheaper overall.
    let lines = vec![
        Line::new("Ring", None, ["A", "P", "Q", "C", "T", "A"]),
        Line::new("Spur", None, ["T", "U"]),
    ];
    let costs = CostConfig::default();
    let graph = StationGraph::build(&lines, costs.base_travel_time);
    let status = LiveStatus::empty();

    let (a, c) = (graph.node("A").unwrap(), graph.node("C").unwrap());
    let hops = hop_distances(&graph, c);
    let search = RouteSearch::new(&graph, &status, &costs);
    let simple = search.search_profile(Profile::Simple, a, c, &hops).unwrap();
    assert_eq!(simple.path, vec!["A", "P", "Q", "C"]);
    assert_eq!(simple.estimated_cost, 9);

    let plan = Planner::new(&graph, &status, &costs).plan("A", "C").unwrap();
    assert_eq!(plan.profile, Profile::Fast);
    assert_eq!(plan.path, vec!["A", "T", "C"]);
    assert_eq!(plan.estimated_cost, 6);
}

#[test]
fn repeated_planning_is_identical() {
    let status = LiveStatus::from_records([("L2", "Falha")], None);
    let first = plan_with(&scenario_lines(), &status, "A", "E").unwrap();
    for _ in 0..5 {
        assert_eq!(plan_with(&scenario_lines(), &status, "A", "E").unwrap(), first);
    }
}

/// Random topology: up to 6 lines over a pool of 10 stations.
fn topology() -> impl Strategy<Value = Vec<Line>> {
    proptest::collection::vec(proptest::collection::vec(0u8..10, 1..7), 1..7).prop_map(|lines| {
        lines
            .into_iter()
            .enumerate()
            .map(|(i, stations)| {
                Line::new(
                    format!("L{i}"),
                    None,
                    stations.into_iter().map(|s| format!("S{s}")),
                )
            })
            .collect()
    })
}

/// Random status marking some lines as degraded.
fn status_for(degraded: &[bool]) -> LiveStatus {
    LiveStatus::from_records(
        degraded
            .iter()
            .enumerate()
            .map(|(i, &bad)| (format!("L{i}"), if bad { "Falha" } else { "Normal" })),
        None,
    )
}

proptest! {
    /// Any returned path is a walk in the graph, with ordered, genuine
    /// transfers and a cost bounded below by its hop count
    #[test]
    fn plans_respect_graph_invariants(
        lines in topology(),
        degraded in proptest::collection::vec(any::<bool>(), 6),
        from in 0u8..10,
        to in 0u8..10,
    ) {
        let costs = CostConfig::default();
        let graph = StationGraph::build(&lines, costs.base_travel_time);
        let status = status_for(&degraded);
        let planner = Planner::new(&graph, &status, &costs);

        let (from, to) = (format!("S{from}"), format!("S{to}"));
        prop_assume!(graph.node(&from).is_some() && graph.node(&to).is_some());

        if let Ok(plan) = planner.plan(&from, &to) {
            prop_assert_eq!(plan.path.first(), Some(&from));
            prop_assert_eq!(plan.path.last(), Some(&to));

            for pair in plan.path.windows(2) {
                let a = graph.node(&pair[0]).unwrap();
                let b = graph.node(&pair[1]).unwrap();
                prop_assert!(graph.edge_between(a, b).is_some());
            }

            prop_assert!(plan.estimated_cost as usize >= plan.hop_count());

            let mut last_index = 0;
            for transfer in &plan.transfers {
                prop_assert_ne!(&transfer.from_line, &transfer.to_line);
                let index = plan.path.iter().position(|s| s == &transfer.station).unwrap();
                prop_assert!(index > last_index);
                prop_assert!(index < plan.path.len() - 1);
                last_index = index;
            }

            if from == to {
                prop_assert_eq!(plan.hop_count(), 0);
                prop_assert_eq!(plan.estimated_cost, 0);
            }
        }
    }

    /// Planning fails only when the stations are disconnected
    #[test]
    fn connected_pairs_always_route(lines in topology(), from in 0u8..10, to in 0u8..10) {
        let costs = CostConfig::default();
        let graph = StationGraph::build(&lines, costs.base_travel_time);
        let status = LiveStatus::empty();
        let planner = Planner::new(&graph, &status, &costs);

        let (from, to) = (format!("S{from}"), format!("S{to}"));
        prop_assume!(graph.node(&from).is_some() && graph.node(&to).is_some());

        let target = graph.node(&to).unwrap();
        let reachable = hop_distances(&graph, target)[graph.node(&from).unwrap().0].is_some();
        prop_assert_eq!(planner.plan(&from, &to).is_ok(), reachable);
    }

    /// Fast-profile cost matches the true shortest distance
    #[test]
    fn fast_cost_is_minimal_without_disruption(lines in topology(), from in 0u8..10, to in 0u8..10) {
        let costs = CostConfig::default();
        let graph = StationGraph::build(&lines, costs.base_travel_time);
        let status = LiveStatus::empty();
        let planner = Planner::new(&graph, &status, &costs);

        let (from, to) = (format!("S{from}"), format!("S{to}"));
        prop_assume!(graph.node(&from).is_some() && graph.node(&to).is_some());

        let target = graph.node(&to).unwrap();
        if let Some(hops) = hop_distances(&graph, target)[graph.node(&from).unwrap().0] {
            let plan = planner.plan(&from, &to).unwrap();
            prop_assert_eq!(plan.estimated_cost, hops * costs.base_travel_time);
            prop_assert_eq!(plan.profile, Profile::Fast);
        }
    }
}
