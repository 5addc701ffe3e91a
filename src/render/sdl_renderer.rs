use super::{Intent, Surface};
use crate::grid::Size;
use crate::state::Status;

use image::RgbaImage;
use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Mod};
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::{FullscreenType, Window};
use sdl2::{EventPump, VideoSubsystem};
use std::collections::HashMap;

const TITLE: &str = "Grid Puzzle Runner";
const BACKGROUND: Color = Color::RGB(30, 30, 30);
const FINISHED: Color = Color::RGB(0, 255, 0);
const MARGIN: i32 = 16;
const BORDER: u32 = 3;

#[derive(Debug, Clone, Copy)]
pub struct SdlConfig {
    pub window_size: Size,
    pub vsync: bool,
    pub fullscreen: bool,
}

/// SDL2 window showing the puzzle frame as a scaled streaming texture.
///
/// Status and result are shown in the window title; a green border marks a
/// finished puzzle. Controls are keyboard driven:
///
/// | key | action |
/// | --- | --- |
/// | Space | start / pause |
/// | S | single step |
/// | C | run to completion |
/// | R | reset |
/// | Tab / Shift+Tab | next / previous puzzle |
/// | + / - / wheel | scale |
/// | I | edit the step interval (Enter commits, Escape cancels) |
/// | Escape | quit |
pub struct SdlSurface {
    canvas: Canvas<Window>,
    events: EventPump,
    video: VideoSubsystem,
    /// One streaming texture per frame size seen; freed with the canvas.
    textures: HashMap<(u32, u32), Texture>,
    texture_size: Option<(u32, u32)>,
    interval_edit: Option<String>,
    title: String,
    should_quit: bool,
}

impl SdlSurface {
    pub fn new(config: &SdlConfig) -> Result<Self, String> {
        let context = sdl2::init()?;
        let video = context.video()?;

        let mut window = video
            .window(
                TITLE,
                config.window_size.width as u32,
                config.window_size.height as u32,
            )
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        if config.fullscreen {
            window.set_fullscreen(FullscreenType::True)?;
        }

        let mut builder = window.into_canvas().accelerated();

        if config.vsync {
            builder = builder.present_vsync();
        }

        let canvas = builder.build().map_err(|e| e.to_string())?;
        let events = context.event_pump()?;

        video.text_input().stop();

        info!("Keys: Space start/pause, S step, C complete, R reset, Tab select, +/- scale, I interval, Esc quit");

        Ok(Self {
            canvas,
            events,
            video,
            textures: HashMap::new(),
            texture_size: None,
            interval_edit: None,
            title: String::new(),
            should_quit: false,
        })
    }

    fn allocate(&mut self, width: u32, height: u32) -> Result<(), String> {
        if self.textures.contains_key(&(width, height)) {
            return Ok(());
        }

        let texture = self
            .canvas
            .texture_creator()
            .create_texture_streaming(PixelFormatEnum::RGBA32, width, height)
            .map_err(|e| e.to_string())?;

        debug!("Allocated {}x{} texture", width, height);

        self.textures.insert((width, height), texture);

        Ok(())
    }

    fn begin_interval_edit(&mut self) {
        self.interval_edit = Some(String::new());
        self.video.text_input().start();
    }

    fn end_interval_edit(&mut self) -> Option<String> {
        self.video.text_input().stop();
        self.interval_edit.take()
    }

    fn handle_edit_event(&mut self, event: Event) -> Option<Intent> {
        match event {
            Event::TextInput { text, .. } => {
                if let Some(buffer) = self.interval_edit.as_mut() {
                    buffer.extend(text.chars().filter(|c| c.is_ascii_digit() || *c == '-'));
                }
                None
            }
            Event::KeyDown {
                keycode: Some(Keycode::Backspace),
                ..
            } => {
                if let Some(buffer) = self.interval_edit.as_mut() {
                    buffer.pop();
                }
                None
            }
            Event::KeyDown {
                keycode: Some(Keycode::Return | Keycode::KpEnter),
                ..
            } => self.end_interval_edit().map(Intent::SetStepInterval),
            Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            } => {
                self.end_interval_edit();
                None
            }
            _ => None,
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Intent> {
        match event {
            Event::Quit { .. }
            | Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            } => {
                self.should_quit = true;
                Some(Intent::Quit)
            }
            Event::MouseWheel { y, .. } if y != 0 => Some(Intent::ScaleBy(y as f32)),
            Event::KeyDown {
                keycode: Some(keycode),
                keymod,
                ..
            } => match keycode {
                Keycode::Space => Some(Intent::ToggleRunning),
                Keycode::S => Some(Intent::Step),
                Keycode::C => Some(Intent::RunToCompletion),
                Keycode::R => Some(Intent::Reset),
                Keycode::Tab if keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD) => {
                    Some(Intent::SelectPrevious)
                }
                Keycode::Tab => Some(Intent::SelectNext),
                Keycode::Plus | Keycode::Equals | Keycode::KpPlus => Some(Intent::ScaleBy(1.0)),
                Keycode::Minus | Keycode::KpMinus => Some(Intent::ScaleBy(-1.0)),
                Keycode::I => {
                    self.begin_interval_edit();
                    None
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn title_for(&self, status: &Status) -> String {
        let mut title = format!("{} | {}", TITLE, status.summary());

        if let Some(buffer) = &self.interval_edit {
            title.push_str(&format!(" | new interval: {}_ms", buffer));
        }

        title
    }
}

impl Surface for SdlSurface {
    type Error = String;

    fn upload(&mut self, frame: &RgbaImage) -> Result<(), Self::Error> {
        let (width, height) = frame.dimensions();

        self.allocate(width, height)?;
        self.texture_size = Some((width, height));

        if let Some(texture) = self.textures.get_mut(&(width, height)) {
            texture
                .update(None, frame.as_raw(), width as usize * 4)
                .map_err(|e| e.to_string())?;
        }

        Ok(())
    }

    fn poll_intents(&mut self) -> Vec<Intent> {
        let events: Vec<Event> = self.events.poll_iter().collect();
        let mut intents = Vec::new();

        for event in events {
            let intent = if self.interval_edit.is_some() && !matches!(event, Event::Quit { .. }) {
                self.handle_edit_event(event)
            } else {
                self.handle_event(event)
            };

            intents.extend(intent);
        }

        intents
    }

    fn present(&mut self, status: &Status) -> Result<(), Self::Error> {
        self.canvas.set_draw_color(BACKGROUND);
        self.canvas.clear();

        let current = self
            .texture_size
            .and_then(|size| self.textures.get(&size).map(|texture| (size, texture)));

        if let Some(((width, height), texture)) = current {
            let target = Rect::new(
                MARGIN,
                MARGIN,
                ((width as f32 * status.scale).round() as u32).max(1),
                ((height as f32 * status.scale).round() as u32).max(1),
            );

            if status.finished {
                let border = Rect::new(
                    MARGIN - BORDER as i32,
                    MARGIN - BORDER as i32,
                    target.width() + BORDER * 2,
                    target.height() + BORDER * 2,
                );

                self.canvas.set_draw_color(FINISHED);
                self.canvas.fill_rect(border)?;
            }

            self.canvas.copy(texture, None, Some(target))?;
        }

        self.canvas.present();

        let title = self.title_for(status);

        if title != self.title {
            self.canvas
                .window_mut()
                .set_title(&title)
                .map_err(|e| e.to_string())?;
            self.title = title;
        }

        Ok(())
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}
