//! Full match scenarios: resource exclusivity, scoring, and seeded runs

use dominion::core::config::{MatchConfig, PolicyKind};
use dominion::world::{generate, FieldSpec, World};
use dominion::{ActionId, GridPos, Match, MatchOutcome, Team};

fn match_on(width: i32, height: i32) -> Match {
    Match::new(MatchConfig::default(), World::new(width, height)).unwrap()
}

#[test]
fn test_reactive_agents_cannot_double_capture() {
    let mut m = match_on(20, 12);
    let a = m.spawn_agent(Team::Red, PolicyKind::Reactive);
    let b = m.spawn_agent(Team::Red, PolicyKind::Reactive);
    // Both standing on the pickup: both decide CaptureAmmo, only the first
    // consume succeeds and the second is a stale-world no-op.
    m.world.agents[a.0 as usize].pos = GridPos::new(6, 4);
    m.world.agents[b.0 as usize].pos = GridPos::new(6, 4);
    m.world.add_pickup(GridPos::new(6, 4));

    let log = m.tick().unwrap();
    assert_eq!(
        log,
        vec![(a, ActionId::CaptureAmmo), (b, ActionId::CaptureAmmo)]
    );
    assert_eq!(m.world.agents[a.0 as usize].ammo, m.config.ammo_amount);
    assert_eq!(m.world.agents[b.0 as usize].ammo, 0);
    assert!(!m.world.pickups[0].available);
}

#[test]
fn test_proactive_agents_cannot_double_capture() {
    let mut m = match_on(20, 12);
    let a = m.spawn_agent(Team::Red, PolicyKind::Proactive);
    let b = m.spawn_agent(Team::Red, PolicyKind::Proactive);
    m.world.agents[a.0 as usize].pos = GridPos::new(6, 4);
    m.world.agents[b.0 as usize].pos = GridPos::new(6, 4);
    m.world.add_pickup(GridPos::new(6, 4));

    // The claim already fails at decide time, so the loser never even
    // attempts the consume.
    let log = m.tick().unwrap();
    assert_eq!(log, vec![(a, ActionId::CaptureAmmo), (b, ActionId::Idle)]);
    assert_eq!(m.world.agents[a.0 as usize].ammo, m.config.ammo_amount);
    assert_eq!(m.world.agents[b.0 as usize].ammo, 0);
}

#[test]
fn test_consumed_claim_is_released() {
    let mut m = match_on(20, 12);
    let a = m.spawn_agent(Team::Red, PolicyKind::Proactive);
    m.world.agents[a.0 as usize].pos = GridPos::new(6, 4);
    let pickup = m.world.add_pickup(GridPos::new(6, 4));

    m.tick().unwrap();
    assert_eq!(m.world.agents[a.0 as usize].ammo, m.config.ammo_amount);
    assert_eq!(m.blackboard.claim_holder(pickup), None);
}

#[test]
fn test_pickup_respawns_and_is_contested_again() {
    let config = MatchConfig {
        ammo_respawn: 4,
        ..MatchConfig::default()
    };
    let mut m = Match::new(config, World::new(20, 12)).unwrap();
    let a = m.spawn_agent(Team::Red, PolicyKind::Proactive);
    m.world.agents[a.0 as usize].pos = GridPos::new(6, 4);
    m.world.add_pickup(GridPos::new(6, 4));

    m.tick().unwrap();
    assert_eq!(m.world.agents[a.0 as usize].ammo, 3);

    // Respawn timer runs down; the agent stays on the cell and grabs it
    // again the tick after it reappears.
    for _ in 0..3 {
        m.tick().unwrap();
    }
    assert!(m.world.pickups[0].available);
    m.tick().unwrap();
    assert_eq!(m.world.agents[a.0 as usize].ammo, 6);
}

#[test]
fn test_point_ownership_flips_when_occupier_changes() {
    let mut m = match_on(20, 12);
    let red = m.spawn_agent(Team::Red, PolicyKind::Reactive);
    let blue = m.spawn_agent(Team::Blue, PolicyKind::Reactive);
    let point = m.world.add_point(GridPos::new(10, 5));

    m.world.agents[red.0 as usize].pos = GridPos::new(10, 5);
    m.tick().unwrap();
    assert_eq!(m.world.point(point).unwrap().owner, Some(Team::Red));

    // Red walks off (nothing keeps it there once it owns the only point and
    // Defend keeps it anchored, so relocate it by hand), blue walks on.
    m.world.agents[red.0 as usize].pos = GridPos::new(2, 2);
    m.world.agents[blue.0 as usize].pos = GridPos::new(10, 5);
    m.tick().unwrap();
    assert_eq!(m.world.point(point).unwrap().owner, Some(Team::Blue));
}

#[test]
fn test_score_conserved_while_both_teams_hold_points() {
    let mut m = match_on(20, 12);
    let red = m.spawn_agent(Team::Red, PolicyKind::Reactive);
    let blue = m.spawn_agent(Team::Blue, PolicyKind::Reactive);
    m.world.add_point(GridPos::new(5, 5));
    m.world.add_point(GridPos::new(15, 5));
    m.world.agents[red.0 as usize].pos = GridPos::new(5, 5);
    m.world.agents[blue.0 as usize].pos = GridPos::new(15, 5);

    for _ in 0..20 {
        m.tick().unwrap();
    }
    // One transfer each way per tick cancels out
    assert_eq!(m.score.red, m.config.max_score / 2);
    assert_eq!(m.score.blue, m.config.max_score / 2);
    assert_eq!(m.score.red + m.score.blue, m.config.max_score);
}

#[test]
fn test_seeded_matches_run_to_completion() {
    for seed in [7u64, 42, 1001] {
        let world = generate(seed, &FieldSpec::default()).unwrap();
        let mut m = Match::new(MatchConfig::default(), world).unwrap();
        for _ in 0..3 {
            m.spawn_agent(Team::Red, PolicyKind::Reactive);
            m.spawn_agent(Team::Blue, PolicyKind::Proactive);
        }

        let report = m.run(400).unwrap();
        assert!(report.ticks <= 400);
        assert!(report.score.red + report.score.blue <= m.config.max_score);
        if report.outcome == MatchOutcome::TickLimit {
            assert_eq!(report.ticks, 400);
        }
    }
}

#[test]
fn test_all_proactive_long_matches_complete() {
    // Claim contention and sighting redirection run hottest with proactive
    // agents on both sides; give the matches full-length tick budgets and
    // check they finish cleanly with coordination actually engaged.
    let mut ammo_pursuits = 0;
    for seed in [3u64, 88, 421] {
        let world = generate(seed, &FieldSpec::default()).unwrap();
        let mut m = Match::new(MatchConfig::default(), world).unwrap();
        for _ in 0..3 {
            m.spawn_agent(Team::Red, PolicyKind::Proactive);
            m.spawn_agent(Team::Blue, PolicyKind::Proactive);
        }

        let report = m.run(3000).unwrap();
        assert!(report.ticks <= 3000);
        assert!(report.score.red + report.score.blue <= m.config.max_score);
        ammo_pursuits += report.tally.capture_ammo;
    }
    assert!(ammo_pursuits > 0);
}

#[test]
fn test_same_seed_same_report_scores() {
    let run = |seed: u64| {
        let world = generate(seed, &FieldSpec::default()).unwrap();
        let mut m = Match::new(MatchConfig::default(), world).unwrap();
        for _ in 0..2 {
            m.spawn_agent(Team::Red, PolicyKind::Proactive);
            m.spawn_agent(Team::Blue, PolicyKind::Reactive);
        }
        m.run(300).unwrap()
    };
    let first = run(17);
    let second = run(17);
    assert_eq!(first.ticks, second.ticks);
    assert_eq!(first.score, second.score);
    assert_eq!(first.outcome, second.outcome);
}
