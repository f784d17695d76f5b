use pocket_invaders::config::Rules;
use pocket_invaders::entities::*;

#[test]
fn entity_copy_and_eq() {
    assert_eq!(AlienKind::Squid, AlienKind::Squid);
    assert_ne!(AlienKind::Squid, AlienKind::Octopus);
    assert_eq!(Direction::Left.flipped(), Direction::Right);
    assert_eq!(Direction::Right.flipped().flipped(), Direction::Right);
    assert_eq!(Direction::Left.sign(), -1);
    assert_eq!(Direction::Right.sign(), 1);
}

#[test]
fn kind_follows_row_mod_three() {
    assert_eq!(AlienKind::for_row(0), AlienKind::Squid);
    assert_eq!(AlienKind::for_row(1), AlienKind::Crab);
    assert_eq!(AlienKind::for_row(2), AlienKind::Octopus);
    assert_eq!(AlienKind::for_row(3), AlienKind::Squid);
    assert_eq!(AlienKind::Octopus.index(), 2);
}

#[test]
fn grid_position_is_row_major() {
    assert_eq!(grid_position(0), (0, 0));
    assert_eq!(grid_position(4), (0, 4));
    assert_eq!(grid_position(5), (1, 0));
    assert_eq!(grid_position(14), (2, 4));
}

#[test]
fn alien_box_is_half_open() {
    let rules = Rules::default();
    let a = Alien {
        x: 10,
        y: 20,
        alive: true,
        kind: AlienKind::Crab,
    };
    assert!(a.contains(10, 20, &rules));
    assert!(a.contains(17, 27, &rules));
    assert!(!a.contains(18, 20, &rules));
    assert!(!a.contains(10, 28, &rules));
    assert!(!a.contains(9, 20, &rules));
}

#[test]
fn game_state_copy_is_independent() {
    let original = GameState::new(&Rules::default(), 0);
    let mut copy = original;

    copy.player.x = 99;
    copy.score = 999;
    copy.aliens[0].alive = false;
    copy.projectiles[0].active = true;

    assert_eq!(original.player.x, 59);
    assert_eq!(original.score, 0);
    assert!(original.aliens[0].alive);
    assert_eq!(original.active_projectiles().count(), 0);

    assert_eq!(copy.player.x, 99);
    assert_eq!(copy.score, 999);
    assert!(!copy.aliens[0].alive);
    assert_eq!(copy.active_projectiles().count(), 1);
}

#[test]
fn alive_aliens_skips_dead() {
    let mut s = GameState::new(&Rules::default(), 0);
    s.aliens[2].alive = false;
    s.aliens[9].alive = false;
    assert_eq!(s.alive_aliens().count(), NUM_ALIENS - 2);
}

#[test]
fn alive_count_tracks_kills() {
    use pocket_invaders::compute::tick;
    use pocket_invaders::input::Intents;

    let rules = Rules::default();
    let mut s = GameState::new(&rules, 0);
    assert_eq!(s.alive_count(), NUM_ALIENS);

    // two shots into the top row, columns 0 and 1
    s.projectiles[0] = Projectile { x: 12, y: 20, active: true };
    s.projectiles[1] = Projectile { x: 26, y: 20, active: true };
    let (s, _) = tick(&s, &Intents::default(), 0, &rules);

    assert_eq!(s.alive_count(), NUM_ALIENS - 2);
    assert_eq!(s.alive_count(), s.alive_aliens().count());
}
