//! End-to-end frame behavior through the public API

use glam::Vec2;
use space_siege::journal::LogLevel;
use space_siege::renderer::{colors, DrawList};
use space_siege::sim::{Bullet, Enemy, Playing, SceneGraph};
use space_siege::{GameContext, Journal, Key, Phase, Settings};

fn started() -> GameContext {
    let mut ctx = GameContext::new(Settings::headless(), Journal::disabled());
    ctx.handle_key_down(Key::Enter);
    ctx
}

#[test]
fn bullet_and_enemy_at_same_spot_score_one_hit() {
    let mut scene = SceneGraph::new("one enemy");
    scene.add(Enemy::new(Vec2::new(100.0, 100.0)));
    let mut level = Playing::with_scene(&Settings::headless(), scene, Journal::disabled());
    level
        .player_mut()
        .bullets_mut()
        .push(Bullet::player(Vec2::new(100.0, 100.0), 1));

    let report = level.resolve_collisions();

    assert_eq!(report.enemy_hits, 1);
    assert_eq!(report.enemies_destroyed, 1);
    assert_eq!(level.score(), 100);
    assert!(!level.player().bullets()[0].active);
    assert!(level.scene().active_enemies().is_empty());
}

#[test]
fn losing_the_last_life_ends_with_current_score() {
    let mut ctx = started();
    if let Some(level) = ctx.playing_mut() {
        level.add_score(1200);
        level.lose_life();
        level.lose_life();
    }
    ctx.update(1.0 / 60.0);
    assert_eq!(ctx.phase_name(), "PLAYING");

    if let Some(level) = ctx.playing_mut() {
        // Killed by an enemy shot on the next frame
        let pos = level.player().pos();
        level.spawn(Bullet::enemy(pos));
    }
    ctx.update(1.0 / 60.0);

    assert!(matches!(ctx.phase(), Phase::GameOver { score: 1200 }));
    assert_eq!(ctx.high_score(), 1200);
}

#[test]
fn pause_freezes_the_simulation() {
    let mut ctx = started();
    ctx.handle_key_down(Key::Left);
    ctx.handle_key_down(Key::Space);
    for _ in 0..5 {
        ctx.update(1.0 / 60.0);
    }

    let snapshot = |ctx: &GameContext| {
        let level = ctx.phase().level().map(|l| {
            let enemies: Vec<Vec2> = l.scene().active_enemies().iter().map(|e| e.pos).collect();
            let bullets: Vec<Vec2> = l.player().bullets().iter().map(|b| b.pos).collect();
            (l.player().pos(), l.player().cooldown(), enemies, bullets)
        });
        format!("{:?}", level)
    };

    ctx.handle_key_down(Key::P);
    let before = snapshot(&ctx);
    for _ in 0..30 {
        ctx.update(0.1);
    }
    assert_eq!(snapshot(&ctx), before);

    ctx.handle_key_down(Key::P);
    assert_eq!(ctx.phase_name(), "PLAYING");
    assert_eq!(snapshot(&ctx), before);
}

#[test]
fn clearing_the_formation_is_victory() {
    let (journal, sink) = Journal::memory();
    let mut ctx = GameContext::new(Settings::headless(), journal);
    ctx.handle_key_down(Key::Enter);

    if let Some(level) = ctx.playing_mut() {
        let hits = level.scene().active_enemies().len() as u64;
        for enemy in level.scene_mut().active_enemies_mut() {
            enemy.take_damage(1);
        }
        level.add_score(hits * 100);
    }
    ctx.update(1.0 / 60.0);

    assert!(matches!(ctx.phase(), Phase::Victory { score: 2400 }));
    assert!(sink.contains(LogLevel::State, "Game: PLAYING -> VICTORY"));
    assert!(sink.contains(LogLevel::Info, "Victory! Final Score: 2400"));

    let mut list = DrawList::new();
    ctx.render(&mut list);
    assert!(list.has_text("VICTORY!"));
    assert!(list.has_text("Final Score: 2400"));

    ctx.handle_key_down(Key::Enter);
    assert_eq!(ctx.playing().map(|l| l.scene().active_enemies().len()), Some(24));
}

#[test]
fn shooting_down_an_enemy_through_frames() {
    let mut ctx = started();
    // The x 340 column drifts right into the path of a single shot
    ctx.handle_key_down(Key::Space);
    let mut frames = 0;
    while ctx.playing().is_some_and(|l| l.score() == 0) && frames < 600 {
        ctx.update(1.0 / 60.0);
        frames += 1;
    }
    assert_eq!(ctx.playing().map(|l| l.score()), Some(100));
    assert_eq!(ctx.playing().map(|l| l.scene().active_enemies().len()), Some(23));
}

#[test]
fn escape_from_menu_requests_quit() {
    let mut ctx = started();
    ctx.handle_key_down(Key::Escape);
    assert_eq!(ctx.phase_name(), "MENU");
    assert!(!ctx.should_quit());
    ctx.handle_key_down(Key::Escape);
    assert!(ctx.should_quit());
}

#[test]
fn playing_frame_draws_every_enemy() {
    let ctx = started();
    let mut list = DrawList::new();
    ctx.render(&mut list);
    assert_eq!(list.count_rects(colors::ENEMY), 24);
    assert_eq!(list.count_rects(colors::PLAYER), 1);
}
