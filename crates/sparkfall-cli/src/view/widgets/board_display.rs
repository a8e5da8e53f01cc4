use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::{DotRaster, widgets::to_color};

/// Upper half block: foreground paints the top dot, background the bottom.
const HALF_BLOCK: &str = "▀";

/// Renders a [`DotRaster`] with two dots stacked in every terminal cell.
#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    raster: &'a DotRaster,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub(crate) fn new(raster: &'a DotRaster) -> Self {
        Self {
            raster,
            block: None,
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        let inner = u16::try_from(self.raster.width()).unwrap_or(u16::MAX);
        inner.saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }

    pub(crate) fn height(&self) -> u16 {
        let inner = u16::try_from(self.raster.height().div_ceil(2)).unwrap_or(u16::MAX);
        inner.saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        for (row, y) in (area.top()..area.bottom()).enumerate() {
            for (col, x) in (area.left()..area.right()).enumerate() {
                let Some(top) = self.raster.get(col, row * 2) else {
                    continue;
                };
                let bottom = self.raster.get(col, row * 2 + 1).unwrap_or(top);
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}
