use bevy::prelude::*;

use crate::core::catalog::{self, FRUITS};
use crate::core::session::GameSession;
use crate::gameplay::restart::RestartRequested;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud).add_systems(
            Update,
            (update_status_text, update_end_overlay, restart_button),
        );
    }
}

#[derive(Component)]
struct StatusText;

#[derive(Component)]
struct EndOverlay;

#[derive(Component)]
struct EndMessage;

#[derive(Component)]
struct RestartButton;

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("StatusText"),
        StatusText,
        Text::new("score 0"),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));

    let order = FRUITS
        .iter()
        .map(|kind| kind.name)
        .collect::<Vec<_>>()
        .join(" > ");
    commands.spawn((
        Name::new("OrderGuide"),
        Text::new(order),
        TextFont {
            font_size: 11.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(6.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));

    commands
        .spawn((
            Name::new("EndOverlay"),
            EndOverlay,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                EndMessage,
                Text::new(""),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent
                .spawn((
                    RestartButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(18.0), Val::Px(8.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.18, 0.55, 0.25)),
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("restart (R)"),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

fn update_status_text(session: Res<GameSession>, mut text_q: Query<&mut Text, With<StatusText>>) {
    if !session.is_changed() {
        return;
    }
    let Ok(mut text) = text_q.single_mut() else {
        return;
    };
    let next = catalog::kind_of(session.next_rank).map_or("?", |kind| kind.name);
    text.0 = format!("score {}   next: {}", session.score, next);
}

fn update_end_overlay(
    session: Res<GameSession>,
    mut overlay_q: Query<&mut Visibility, With<EndOverlay>>,
    mut message_q: Query<&mut Text, With<EndMessage>>,
) {
    if !session.is_changed() {
        return;
    }
    let Ok(mut visibility) = overlay_q.single_mut() else {
        return;
    };
    let Ok(mut message) = message_q.single_mut() else {
        return;
    };
    if session.game_won {
        *visibility = Visibility::Inherited;
        message.0 = format!("you made a watermelon!\nscore {}", session.score);
    } else if session.game_over {
        *visibility = Visibility::Inherited;
        message.0 = format!("game over\nscore {}", session.score);
    } else {
        *visibility = Visibility::Hidden;
    }
}

fn restart_button(
    interactions: Query<&Interaction, (Changed<Interaction>, With<RestartButton>)>,
    mut restarts: EventWriter<RestartRequested>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            restarts.write(RestartRequested);
        }
    }
}
