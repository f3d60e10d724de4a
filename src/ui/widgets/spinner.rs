// SPDX-License-Identifier: MPL-2.0
//! Rotating arc shown while a document opens.

use crate::config::SPINNER_SPEED;
use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, path::Arc, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Element, Length, Radians, Rectangle, Renderer, Theme};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Rotation angle advanced on every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpinnerState {
    rotation: f32,
}

impl SpinnerState {
    pub fn tick(&mut self) {
        self.rotation = (self.rotation + SPINNER_SPEED) % TAU;
    }

    pub fn reset(&mut self) {
        self.rotation = 0.0;
    }

    #[must_use]
    pub fn rotation(self) -> f32 {
        self.rotation
    }
}

/// Canvas program drawing a faint ring with a half-circle arc on top.
#[derive(Debug, Clone, Copy)]
pub struct Spinner {
    rotation: f32,
    color: Color,
}

impl Spinner {
    #[must_use]
    pub fn new(state: SpinnerState, color: Color) -> Self {
        Self {
            rotation: state.rotation,
            color,
        }
    }

    pub fn view<'a, Message: 'a>(self) -> Element<'a, Message> {
        Canvas::new(self)
            .width(Length::Fixed(sizing::SPINNER))
            .height(Length::Fixed(sizing::SPINNER))
            .into()
    }
}

impl<Message> canvas::Program<Message> for Spinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = frame.width().min(frame.height()) / 2.0 - sizing::SPINNER_STROKE;

        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default()
                .with_width(sizing::SPINNER_STROKE)
                .with_color(Color { a: 0.25, ..self.color }),
        );

        // Starts at 12 o'clock.
        let start = self.rotation - FRAC_PI_2;
        let arc = Path::new(|builder| {
            builder.arc(Arc {
                center,
                radius,
                start_angle: Radians(start),
                end_angle: Radians(start + PI),
            });
        });
        frame.stroke(
            &arc,
            Stroke::default()
                .with_width(sizing::SPINNER_STROKE)
                .with_color(self.color)
                .with_line_cap(canvas::LineCap::Round),
        );

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_wraps_within_full_turn() {
        let mut state = SpinnerState::default();
        for _ in 0..200 {
            state.tick();
            assert!((0.0..TAU).contains(&state.rotation()));
        }
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut state = SpinnerState::default();
        state.tick();
        state.reset();
        assert_eq!(state.rotation(), 0.0);
    }
}
