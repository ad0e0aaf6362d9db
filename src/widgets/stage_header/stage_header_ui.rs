//! Stage header - egui rendering
//!
//! Draws a [`StageHeader`] description. The engine run controls come first
//! in both bars and are drawn by the caller through `controls`. Any activated
//! control is invoked on the [`StageHeaderActions`] table and returned.

use eframe::egui::{self, Color32, Ui};

use super::stage_header::{
    ControlButton, EngineHandle, FullScreenBar, FullScreenButton, NormalBar, SaveIndicator,
    StageAction, StageHeader,
};
use super::stage_header_actions::StageHeaderActions;

const SAVED_COLOR: Color32 = Color32::from_rgb(76, 175, 80);
const OVERLAY_FILL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 160);

/// Render the header inside `ui`. Returns the action invoked this frame.
pub fn render(
    ui: &mut Ui,
    header: &StageHeader,
    actions: &StageHeaderActions,
    engine: &EngineHandle,
    controls: impl FnOnce(&mut Ui, &EngineHandle),
) -> Option<StageAction> {
    let activated = match header {
        StageHeader::FullScreen(bar) => render_full_screen(ui, bar, engine, controls),
        StageHeader::Normal(bar) => render_normal(ui, bar, actions, engine, controls),
    };
    if let Some(action) = activated {
        actions.invoke(action);
    }
    activated
}

fn render_full_screen(
    ui: &mut Ui,
    bar: &FullScreenBar,
    engine: &EngineHandle,
    controls: impl FnOnce(&mut Ui, &EngineHandle),
) -> Option<StageAction> {
    let mut activated = None;
    egui::Frame::NONE.fill(OVERLAY_FILL).inner_margin(4.0).show(ui, |ui| {
        // Overlay spans the whole stage width
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            controls(ui, engine);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match &bar.stage_button {
                    FullScreenButton::Branding(link) => {
                        ui.hyperlink_to(link.alt, link.href);
                    }
                    FullScreenButton::Exit(button) => {
                        if control_button(ui, button).clicked() {
                            activated = Some(button.action);
                        }
                        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                            activated = Some(StageAction::KeyPress);
                        }
                    }
                }
            });
        });
    });
    activated
}

fn render_normal(
    ui: &mut Ui,
    bar: &NormalBar,
    actions: &StageHeaderActions,
    engine: &EngineHandle,
    controls: impl FnOnce(&mut Ui, &EngineHandle),
) -> Option<StageAction> {
    let mut activated = None;
    ui.horizontal(|ui| {
        controls(ui, engine);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            // Right-to-left: drawn in reverse of visual order
            if control_button(ui, &bar.full_screen).clicked() {
                activated = Some(bar.full_screen.action);
            }

            if let Some(group) = &bar.size_toggle {
                for entry in group.entries.iter().rev() {
                    let response = ui
                        .selectable_label(entry.selected, entry.icon.glyph())
                        .on_hover_text(&entry.title);
                    if response.clicked() {
                        activated = Some(entry.action);
                    }
                }
            }

            ui.separator();

            if let Some(download) = &bar.download
                && actions.is_bound(download.action)
                && control_button(ui, download).clicked()
            {
                activated = Some(download.action);
            }

            if control_button(ui, &bar.save).clicked() {
                activated = Some(bar.save.action);
            }

            for indicator in bar.indicators.iter().rev() {
                save_indicator(ui, *indicator);
            }
        });
    });
    activated
}

fn control_button(ui: &mut Ui, button: &ControlButton) -> egui::Response {
    ui.button(button.icon.glyph()).on_hover_text(&button.title)
}

fn save_indicator(ui: &mut Ui, indicator: SaveIndicator) {
    match indicator.icon() {
        Some(icon) => {
            ui.colored_label(SAVED_COLOR, indicator.text());
            ui.colored_label(SAVED_COLOR, icon.glyph());
        }
        None => {
            ui.label(indicator.text());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::stage_header::messages::DefaultMessages;
    use crate::widgets::stage_header::stage_header::{Icon, StageSizeMode, StageViewState, project};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Counts {
        small: Cell<u32>,
        large: Cell<u32>,
        full: Cell<u32>,
        un_full: Cell<u32>,
        save: Cell<u32>,
        key: Cell<u32>,
    }

    fn counting_actions() -> (StageHeaderActions, Rc<Counts>) {
        let counts = Rc::new(Counts::default());
        let hook = |pick: fn(&Counts) -> &Cell<u32>| {
            let c = Rc::clone(&counts);
            Box::new(move || pick(&c).set(pick(&c).get() + 1)) as Box<dyn Fn()>
        };
        let actions = StageHeaderActions {
            on_set_stage_small: hook(|c| &c.small),
            on_set_stage_large: hook(|c| &c.large),
            on_set_stage_full: hook(|c| &c.full),
            on_set_stage_un_full: hook(|c| &c.un_full),
            on_click_save: hook(|c| &c.save),
            on_key_press: hook(|c| &c.key),
            on_download_project: None,
        };
        (actions, counts)
    }

    const SCREEN: egui::Rect = egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(800.0, 120.0));

    fn frame_input(events: Vec<egui::Event>) -> egui::RawInput {
        egui::RawInput { screen_rect: Some(SCREEN), events, ..Default::default() }
    }

    /// Run one frame on `ctx`. Keeps the activation if a discard pass follows.
    fn frame(
        ctx: &egui::Context,
        input: egui::RawInput,
        header: &StageHeader,
        actions: &StageHeaderActions,
    ) -> (Option<StageAction>, egui::FullOutput) {
        let engine = EngineHandle::detached();
        let mut activated = None;
        let mut controls_drawn = false;
        let output = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                if let Some(action) = render(ui, header, actions, &engine, |ui, _| {
                    controls_drawn = true;
                    ui.label("⚑");
                }) {
                    activated = Some(action);
                }
            });
        });
        assert!(controls_drawn);
        (activated, output)
    }

    fn run_frame(input: egui::RawInput, header: &StageHeader, actions: &StageHeaderActions) -> Option<StageAction> {
        frame(&egui::Context::default(), input, header, actions).0
    }

    /// Center of the painted text equal to `glyph`.
    fn glyph_center(output: &egui::FullOutput, glyph: &str) -> egui::Pos2 {
        output
            .shapes
            .iter()
            .find_map(|clipped| match &clipped.shape {
                egui::Shape::Text(text) if text.galley.text() == glyph => {
                    Some(text.visual_bounding_rect().center())
                }
                _ => None,
            })
            .unwrap_or_else(|| panic!("{} not drawn", glyph))
    }

    fn pointer_button(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    /// Lay out once, then press and release on the control drawn as `glyph`.
    /// Returns what each of the three frames activated.
    fn click_glyph(header: &StageHeader, actions: &StageHeaderActions, glyph: &str) -> Vec<Option<StageAction>> {
        let ctx = egui::Context::default();
        let (laid_out, output) = frame(&ctx, frame_input(vec![]), header, actions);
        let pos = glyph_center(&output, glyph);
        let (pressed, _) = frame(
            &ctx,
            frame_input(vec![egui::Event::PointerMoved(pos), pointer_button(pos, true)]),
            header,
            actions,
        );
        let (released, _) = frame(&ctx, frame_input(vec![pointer_button(pos, false)]), header, actions);
        vec![laid_out, pressed, released]
    }

    #[test]
    fn test_activating_small_only_calls_small() {
        let (actions, counts) = counting_actions();
        let header = project(
            &StageViewState { stage_size_mode: StageSizeMode::Large, ..Default::default() },
            &DefaultMessages,
        );
        let small = &header.size_toggle().unwrap().entries[0];
        assert!(!small.selected);

        actions.invoke(small.action);
        assert_eq!(counts.small.get(), 1);
        assert_eq!(counts.large.get(), 0);
    }

    #[test]
    fn test_reselecting_active_size_still_calls_back() {
        let (actions, counts) = counting_actions();
        let header = project(&StageViewState::default(), &DefaultMessages);
        let large = &header.size_toggle().unwrap().entries[1];
        assert!(large.selected);

        actions.invoke(large.action);
        actions.invoke(large.action);
        assert_eq!(counts.large.get(), 2);
    }

    #[test]
    fn test_render_without_input_invokes_nothing() {
        let (actions, counts) = counting_actions();
        for state in [
            StageViewState::default(),
            StageViewState { is_player_only: true, is_manual_updating: true, ..Default::default() },
            StageViewState { is_full_screen: true, show_branding: true, ..Default::default() },
        ] {
            let header = project(&state, &DefaultMessages);
            assert_eq!(run_frame(egui::RawInput::default(), &header, &actions), None);
        }
        assert_eq!(counts.save.get() + counts.full.get() + counts.small.get(), 0);
    }

    #[test]
    fn test_escape_in_full_screen_calls_key_press() {
        let (actions, counts) = counting_actions();
        let header = project(&StageViewState { is_full_screen: true, ..Default::default() }, &DefaultMessages);

        let input = egui::RawInput {
            events: vec![egui::Event::Key {
                key: egui::Key::Escape,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        };
        assert_eq!(run_frame(input, &header, &actions), Some(StageAction::KeyPress));
        assert_eq!(counts.key.get(), 1);
        assert_eq!(counts.un_full.get(), 0);
    }

    #[test]
    fn test_clicking_small_toggle_calls_small_only() {
        let (actions, counts) = counting_actions();
        let header = project(
            &StageViewState { stage_size_mode: StageSizeMode::Large, ..Default::default() },
            &DefaultMessages,
        );

        let frames = click_glyph(&header, &actions, Icon::SmallStage.glyph());
        assert_eq!(frames, vec![None, None, Some(StageAction::SetStageSmall)]);
        assert_eq!(counts.small.get(), 1);
        assert_eq!(counts.large.get(), 0);
        assert_eq!(counts.save.get(), 0);
    }

    #[test]
    fn test_clicking_save_calls_save_while_updating() {
        let (actions, counts) = counting_actions();
        let header = project(
            &StageViewState { is_manual_updating: true, ..Default::default() },
            &DefaultMessages,
        );

        let frames = click_glyph(&header, &actions, Icon::Save.glyph());
        assert_eq!(frames.last(), Some(&Some(StageAction::ClickSave)));
        assert_eq!(counts.save.get(), 1);
        assert_eq!(counts.small.get() + counts.large.get() + counts.full.get(), 0);
    }

    #[test]
    fn test_clicking_enter_full_screen_calls_full() {
        let (actions, counts) = counting_actions();
        let header = project(&StageViewState::default(), &DefaultMessages);

        click_glyph(&header, &actions, Icon::FullScreen.glyph());
        assert_eq!(counts.full.get(), 1);
        assert_eq!(counts.un_full.get(), 0);
        assert_eq!(counts.save.get(), 0);
    }
}
