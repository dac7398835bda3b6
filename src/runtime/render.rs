//! Softbuffer presentation of the rendered frame

use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::Result;
use fontdue::Font;
use softbuffer::Surface;
use winit::window::Window;

use grido::model::AppModel;
use grido::view::{self, Frame, GlyphCache, TextPainter};

pub struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    /// Softbuffer doesn't guarantee buffer contents between frames, so the
    /// frame is drawn here and copied on present.
    back_buffer: Vec<u32>,
    width: u32,
    height: u32,
    font: Option<Font>,
    glyph_cache: GlyphCache,
}

impl Renderer {
    pub fn new(
        window: Rc<Window>,
        context: &softbuffer::Context<Rc<Window>>,
        font: Option<Font>,
    ) -> Result<Self> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;
        resize_surface(&mut surface, width, height)?;

        Ok(Self {
            surface,
            back_buffer: vec![0u32; (width as usize) * (height as usize)],
            width,
            height,
            font,
            glyph_cache: GlyphCache::new(),
        })
    }

    pub fn render(&mut self, model: &AppModel) -> Result<()> {
        let (width, height) = (model.window_size.0.max(1), model.window_size.1.max(1));
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.back_buffer
                .resize((width as usize) * (height as usize), 0);
            resize_surface(&mut self.surface, width, height)?;
        }

        {
            let mut frame = Frame::new(&mut self.back_buffer, width as usize, height as usize);
            let mut text = TextPainter::new(self.font.as_ref(), &mut self.glyph_cache);
            view::render(model, &mut frame, &mut text);
        }

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get surface buffer: {}", e))?;
        buffer.copy_from_slice(&self.back_buffer);
        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;

        Ok(())
    }
}

fn resize_surface(
    surface: &mut Surface<Rc<Window>, Rc<Window>>,
    width: u32,
    height: u32,
) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
        anyhow::bail!("Surface size must be non-zero, got {}x{}", width, height);
    };
    surface
        .resize(w, h)
        .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))
}
