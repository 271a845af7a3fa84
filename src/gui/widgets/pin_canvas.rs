use std::sync::Arc;

use iced::{
    Color, Point, Rectangle, Renderer, Size, Theme,
    mouse,
    widget::{
        canvas::{self, Frame, Geometry, Path, Stroke},
        image::Handle,
    },
};

use image::RgbaImage;
use tracing::debug;

use crate::core::Pin;
use crate::gui::widgets::to_color;
use crate::icons::Icon;
use crate::models::Marker;

/// Downtown Ilhéus, used when there is nothing to frame.
const DEFAULT_CENTER: (f64, f64) = (-14.7935, -39.0464);
const DEFAULT_SPAN: f64 = 0.08;
const PIN_RADIUS: f32 = 12.0;
const HIT_SLOP: f32 = 4.0;
const BACKGROUND: Color = Color::from_rgb(0.90, 0.95, 0.96);

/// Latitude/longitude window mapped onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
}

impl Viewport {
    /// Frames every marker, visible or not, so toggling layers keeps pins in place.
    fn framing(markers: &[Marker]) -> Self {
        let (lat, lng) = DEFAULT_CENTER;
        let mut viewport = markers
            .iter()
            .fold(None, |acc: Option<Viewport>, m| {
                Some(match acc {
                    None => Viewport {
                        min_lat: m.lat,
                        max_lat: m.lat,
                        min_lng: m.lng,
                        max_lng: m.lng,
                    },
                    Some(v) => Viewport {
                        min_lat: v.min_lat.min(m.lat),
                        max_lat: v.max_lat.max(m.lat),
                        min_lng: v.min_lng.min(m.lng),
                        max_lng: v.max_lng.max(m.lng),
                    },
                })
            })
            .unwrap_or(Viewport {
                min_lat: lat,
                max_lat: lat,
                min_lng: lng,
                max_lng: lng,
            });
        let lat_pad = ((viewport.max_lat - viewport.min_lat) * 0.1).max(DEFAULT_SPAN / 2.0);
        let lng_pad = ((viewport.max_lng - viewport.min_lng) * 0.1).max(DEFAULT_SPAN / 2.0);
        viewport.min_lat -= lat_pad;
        viewport.max_lat += lat_pad;
        viewport.min_lng -= lng_pad;
        viewport.max_lng += lng_pad;
        viewport
    }

    fn project(&self, lat: f64, lng: f64, size: Size) -> Point {
        let x = (lng - self.min_lng) / (self.max_lng - self.min_lng);
        let y = (self.max_lat - lat) / (self.max_lat - self.min_lat);
        Point::new(x as f32 * size.width, y as f32 * size.height)
    }
}

/// Image handles for raster icons, built once when the icons are ready.
///
/// Keyed by the shared icon buffer, so a handle keeps its id across redraws
/// and the renderer uploads each texture once.
#[derive(Debug, Clone, Default)]
pub struct RasterHandles(Vec<(Arc<RgbaImage>, Handle)>);

impl RasterHandles {
    pub fn new(icons: impl IntoIterator<Item = Icon>) -> Self {
        let mut handles: Vec<(Arc<RgbaImage>, Handle)> = Vec::new();
        for icon in icons {
            let Icon::Raster(image) = icon else {
                continue;
            };
            if handles.iter().any(|(known, _)| Arc::ptr_eq(known, &image)) {
                continue;
            }
            let handle = to_handle(&image);
            handles.push((image, handle));
        }
        Self(handles)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn get(&self, image: &Arc<RgbaImage>) -> Option<&Handle> {
        self.0
            .iter()
            .find(|(known, _)| Arc::ptr_eq(known, image))
            .map(|(_, handle)| handle)
    }
}

fn to_handle(image: &RgbaImage) -> Handle {
    Handle::from_rgba(image.width(), image.height(), image.as_raw().clone())
}

/// Draws pins over a flat projection and reports clicks.
pub struct PinCanvas<'a> {
    pins: Vec<Pin>,
    handles: &'a RasterHandles,
    selected: Option<String>,
    viewport: Viewport,
}

impl<'a> PinCanvas<'a> {
    pub fn new(
        pins: Vec<Pin>,
        handles: &'a RasterHandles,
        selected: Option<&str>,
        all_markers: &[Marker],
    ) -> Self {
        Self {
            pins,
            handles,
            selected: selected.map(str::to_string),
            viewport: Viewport::framing(all_markers),
        }
    }

    fn radius(&self, pin: &Pin) -> f32 {
        let scale = match &pin.icon {
            Icon::Vector(vector) => vector.scale,
            Icon::Raster(_) => 1.0,
        };
        let selected = self.selected.as_deref() == Some(pin.marker_id.as_str());
        PIN_RADIUS * scale * if selected { 1.3 } else { 1.0 }
    }

    /// Topmost pin under `position`. Later pins are drawn on top.
    fn hit(&self, position: Point, size: Size) -> Option<&Pin> {
        self.pins.iter().rev().find(|pin| {
            let center = self.viewport.project(pin.lat, pin.lng, size);
            center.distance(position) <= self.radius(pin) + HIT_SLOP
        })
    }
}

/// What a click on the canvas means.
#[derive(Debug, Clone)]
pub enum PinEvent {
    Selected(String),
    Cleared,
}

impl canvas::Program<PinEvent> for PinCanvas<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<PinEvent>> {
        let canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event else {
            return None;
        };
        let position = cursor.position_in(bounds)?;
        let event = match self.hit(position, bounds.size()) {
            Some(pin) => PinEvent::Selected(pin.marker_id.clone()),
            None => PinEvent::Cleared,
        };
        Some(canvas::Action::publish(event).and_capture())
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        for pin in &self.pins {
            let center = self.viewport.project(pin.lat, pin.lng, bounds.size());
            let radius = self.radius(pin);
            match &pin.icon {
                Icon::Vector(vector) => {
                    let disc = Path::circle(center, radius);
                    frame.fill(&disc, to_color(vector.fill_color, vector.fill_opacity));
                    frame.stroke(
                        &disc,
                        Stroke::default()
                            .with_color(to_color(vector.stroke_color, 1.0))
                            .with_width(vector.stroke_weight),
                    );
                }
                Icon::Raster(icon) => {
                    let bounds = Rectangle::new(
                        Point::new(center.x - radius, center.y - radius),
                        Size::new(radius * 2.0, radius * 2.0),
                    );
                    match self.handles.get(icon) {
                        Some(handle) => frame.draw_image(bounds, handle),
                        None => {
                            debug!(marker = %pin.marker_id, "raster icon without a cached handle");
                            frame.draw_image(bounds, &to_handle(icon));
                        }
                    }
                }
            }
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match cursor.position_in(bounds) {
            Some(position) if self.hit(position, bounds.size()).is_some() => {
                mouse::Interaction::Pointer
            }
            _ => mouse::Interaction::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::VectorIconFactory;
    use crate::{Category, HexColor, IconFactory};

    #[test]
    fn test_one_handle_per_shared_icon() {
        let hotel = Arc::new(RgbaImage::new(4, 4));
        let beach = Arc::new(RgbaImage::new(4, 4));
        let color: HexColor = "#4ECDC4".parse().expect("valid color");
        let vector = VectorIconFactory.render(color, &Category::Hotels);

        let handles = RasterHandles::new(
            [
                Icon::Raster(Arc::clone(&hotel)),
                Icon::Raster(Arc::clone(&beach)),
                Icon::Raster(Arc::clone(&hotel)),
            ]
            .into_iter()
            .chain(vector),
        );

        assert_eq!(handles.len(), 2);
        let first = handles.get(&hotel).map(Handle::id);
        let again = handles.get(&Arc::clone(&hotel)).map(Handle::id);
        assert!(first.is_some());
        assert_eq!(first, again);
        assert_ne!(first, handles.get(&beach).map(Handle::id));
        assert!(handles.get(&Arc::new(RgbaImage::new(4, 4))).is_none());
    }
}
