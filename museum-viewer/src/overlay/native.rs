use crate::curator::{CuratorRequest, describe_query};
use crate::engine::view_state::{CameraMode, ViewMode, ViewStateController};
use crate::overlay::intent::{IntentSource, NavButton, OverlayIntent, OverlayIntentEvent, nav_intent};
use crate::overlay::snapshot::OverlaySnapshot;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::showcase::{
    NATIVE_ARTICLE_HEIGHT, NATIVE_VIEWPORT_HEIGHT, NATIVE_WHEEL_LINE_PIXELS,
};

#[derive(Component)]
pub struct DockText;

#[derive(Component)]
pub struct CardText;

/// Desktop stand-in for the host page: title, dock line and description card.
pub fn create_native_overlays(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("BASTAM  |  DIGITAL ARCHIVE"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.11, 0.098, 0.09)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(24.0),
                    left: Val::Px(24.0),
                    ..default()
                },
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 15.0,
                    ..default()
                },
                TextColor(Color::srgb(0.11, 0.098, 0.09)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(24.0),
                    left: Val::Px(24.0),
                    ..default()
                },
                DockText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.24, 0.2, 0.17)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Percent(30.0),
                    left: Val::Px(24.0),
                    max_width: Val::Px(380.0),
                    ..default()
                },
                CardText,
            ));
        });
}

/// Refresh overlay text whenever the controller changes.
pub fn update_native_overlays(
    controller: Option<Res<ViewStateController>>,
    mut dock: Query<&mut Text, (With<DockText>, Without<CardText>)>,
    mut card: Query<(&mut Text, &mut Visibility), (With<CardText>, Without<DockText>)>,
) {
    let Some(controller) = controller else {
        return;
    };
    if !controller.is_changed() {
        return;
    }

    let snapshot = OverlaySnapshot::from_controller(&controller);

    for mut text in &mut dock {
        let name = snapshot.card.as_ref().map_or("", |card| card.name.as_str());
        text.0 = format!(
            "{}  {}   [{:?} | {:?} | {:?}]   <-/-> browse  1/2/3 mode  I info  C camera  L language  D curator",
            snapshot.counter, name, snapshot.view_mode, snapshot.camera_mode, snapshot.language
        );
    }

    for (mut text, mut visibility) in &mut card {
        match snapshot.card.as_ref().filter(|card| card.visible) {
            Some(card) => {
                let pending = if card.restoration_pending {
                    "\n\nDIGITAL RECONSTRUCTION PENDING"
                } else {
                    ""
                };
                text.0 = format!(
                    "ARTIFACT {}\n{}\n\n{}{}",
                    card.label, card.name, card.description, pending
                );
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

/// Keyboard shortcuts mirroring the host page dock.
pub fn handle_overlay_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    controller: Option<Res<ViewStateController>>,
    mut intents: EventWriter<OverlayIntentEvent>,
    mut curator_requests: EventWriter<CuratorRequest>,
) {
    let Some(controller) = controller else {
        return;
    };

    if keyboard.just_pressed(KeyCode::KeyD) {
        if let Some(artifact) = controller.active_artifact() {
            curator_requests.write(CuratorRequest {
                request_id: None,
                query: describe_query(artifact),
            });
        }
    }

    let direction = controller.layout_direction();

    let mut send = |intent: OverlayIntent| {
        intents.write(OverlayIntentEvent {
            intent,
            source: IntentSource::Keyboard,
        });
    };

    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        send(nav_intent(NavButton::VisualLeft, direction));
    }
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        send(nav_intent(NavButton::VisualRight, direction));
    }
    if keyboard.just_pressed(KeyCode::Digit1) {
        send(OverlayIntent::SetViewMode(ViewMode::Article));
    }
    if keyboard.just_pressed(KeyCode::Digit2) {
        send(OverlayIntent::SetViewMode(ViewMode::Cinema));
    }
    if keyboard.just_pressed(KeyCode::Digit3) {
        send(OverlayIntent::SetViewMode(ViewMode::Archive));
    }
    if keyboard.just_pressed(KeyCode::KeyI) {
        send(OverlayIntent::ToggleDescription);
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        send(OverlayIntent::ToggleCamera);
    }
    if keyboard.just_pressed(KeyCode::KeyL) {
        send(OverlayIntent::ToggleLanguage);
    }
}

/// Drive a virtual article with the mouse wheel while the camera is
/// cinematic; in orbit mode the wheel belongs to the camera zoom.
pub fn native_article_scroll(
    mut wheel: EventReader<MouseWheel>,
    controller: Option<Res<ViewStateController>>,
    mut scroll_top: Local<f32>,
    mut intents: EventWriter<OverlayIntentEvent>,
) {
    let Some(controller) = controller else {
        wheel.clear();
        return;
    };

    let delta: f32 = wheel
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y * NATIVE_WHEEL_LINE_PIXELS,
            MouseScrollUnit::Pixel => event.y,
        })
        .sum();

    if delta == 0.0 || controller.state().camera_mode != CameraMode::Cinematic {
        return;
    }

    let range = NATIVE_ARTICLE_HEIGHT - NATIVE_VIEWPORT_HEIGHT;
    *scroll_top = (*scroll_top - delta).clamp(0.0, range);

    intents.write(OverlayIntentEvent {
        intent: OverlayIntent::Scroll {
            scroll_top: *scroll_top,
            scroll_height: NATIVE_ARTICLE_HEIGHT,
            client_height: NATIVE_VIEWPORT_HEIGHT,
        },
        source: IntentSource::Wheel,
    });
}
