//! UI module - score HUD and game over overlay

use bevy::prelude::*;
use ring_runner::RunPhase;

use crate::game::Run;
use crate::AppState;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(OnEnter(AppState::Playing), setup_hud)
            .add_systems(OnExit(AppState::GameOver), cleanup_hud)
            .add_systems(OnEnter(AppState::GameOver), setup_game_over)
            .add_systems(OnExit(AppState::GameOver), cleanup_game_over)
            .add_systems(Update, update_hud.run_if(resource_exists::<Run>));
    }
}

/// Marker for HUD UI
#[derive(Component)]
struct HudUI;

/// Marker for the score readout
#[derive(Component)]
struct ScoreText;

/// Marker for game over UI
#[derive(Component)]
struct GameOverUI;

/// Score readout text; "Game Over" once the run is lost
fn score_label(phase: RunPhase, score: u32) -> String {
    if phase.is_over() {
        "Game Over".to_string()
    } else {
        score.to_string()
    }
}

fn setup_hud(mut commands: Commands) {
    // Score (top left)
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            padding: UiRect::all(Val::Px(10.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        HudUI,
    )).with_children(|parent| {
        parent.spawn((
            Text::new("0"),
            TextFont {
                font_size: 32.0,
                ..default()
            },
            TextColor(Color::srgb(1.0, 1.0, 0.0)),
            ScoreText,
        ));
    });
}

fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudUI>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

fn update_hud(run: Res<Run>, mut query: Query<&mut Text, With<ScoreText>>) {
    let label = score_label(run.0.phase, run.0.score);

    for mut text in query.iter_mut() {
        if text.0 != label {
            text.0 = label.clone();
        }
    }
}

fn setup_game_over(mut commands: Commands, run: Option<Res<Run>>) {
    let score = run.map(|r| r.0.score).unwrap_or(0);

    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(12.0),
            ..default()
        },
        GameOverUI,
    )).with_children(|parent| {
        parent.spawn((
            Text::new(format!("Rings collected: {}", score)),
            TextFont {
                font_size: 36.0,
                ..default()
            },
            TextColor(Color::WHITE),
        ));

        parent.spawn((
            Text::new("Press Enter to play again"),
            TextFont {
                font_size: 20.0,
                ..default()
            },
            TextColor(Color::srgb(0.7, 0.7, 0.7)),
        ));
    });
}

fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverUI>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_label() {
        assert_eq!(score_label(RunPhase::Running, 0), "0");
        assert_eq!(score_label(RunPhase::Running, 7), "7");
        assert_eq!(score_label(RunPhase::GameOver, 7), "Game Over");
        assert_eq!(score_label(RunPhase::Ended, 7), "Game Over");
    }
}
