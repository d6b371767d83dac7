//! Carousel pagination geometry
//!
//! Pure arithmetic behind the horizontally-scrolling title rows: how many
//! cards fit the viewport, which page index is navigable, and where a drag
//! gesture should scroll to. No UI types here; the component layer feeds in
//! widths and pointer positions and applies the returned offsets.

/// Horizontal chrome (arrows + page padding) subtracted from the viewport
pub const CHROME_MARGIN: u32 = 120;

/// Pointer displacement is scaled by this factor while dragging
pub const DRAG_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, Copy)]
struct DragState {
    start_x: f64,
    scroll_origin: f64,
}

/// Paginator for one carousel row
#[derive(Debug, Clone)]
pub struct CarouselPaginator {
    item_count: u32,
    /// Card width plus inter-card margin, in pixels
    card_stride: u32,
    index: u32,
    index_max: u32,
    cards_visible: u32,
    drag: Option<DragState>,
}

impl CarouselPaginator {
    pub fn new(item_count: u32, card_stride: u32) -> Self {
        Self {
            item_count,
            card_stride,
            index: 0,
            index_max: 0,
            cards_visible: 0,
            drag: None,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn index_max(&self) -> u32 {
        self.index_max
    }

    pub fn cards_visible(&self) -> u32 {
        self.cards_visible
    }

    /// Recompute the navigable range for an available width (viewport minus
    /// chrome). The current index is clamped so the view is never left
    /// scrolled past the last valid page.
    pub fn resize(&mut self, available_width: u32) {
        if self.card_stride == 0 {
            return;
        }

        self.cards_visible = available_width / self.card_stride;
        self.index_max = self.item_count.saturating_sub(self.cards_visible);

        if self.index > self.index_max {
            self.index = self.index_max;
        }
    }

    /// Recompute from the full viewport width
    pub fn resize_viewport(&mut self, viewport_width: u32) {
        self.resize(viewport_width.saturating_sub(CHROME_MARGIN));
    }

    pub fn can_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_next(&self) -> bool {
        self.index < self.index_max
    }

    /// Move one card back; returns the scroll offset to animate to
    pub fn back(&mut self) -> Option<u32> {
        if !self.can_back() {
            return None;
        }
        self.index -= 1;
        Some(self.scroll_offset())
    }

    /// Move one card forward; returns the scroll offset to animate to
    pub fn next(&mut self) -> Option<u32> {
        if !self.can_next() {
            return None;
        }
        self.index += 1;
        Some(self.scroll_offset())
    }

    /// Scroll offset of the current page
    pub fn scroll_offset(&self) -> u32 {
        self.index * self.card_stride
    }

    /// Begin a drag gesture at pointer position `x` with the row's current
    /// scroll offset
    pub fn drag_start(&mut self, x: f64, scroll_offset: f64) {
        self.drag = Some(DragState {
            start_x: x,
            scroll_origin: scroll_offset,
        });
    }

    /// Pointer moved during a drag; returns the new scroll offset, or `None`
    /// when no gesture is active
    pub fn drag_move(&self, x: f64) -> Option<f64> {
        let drag = self.drag?;
        let walk = (x - drag.start_x) * DRAG_MULTIPLIER;
        Some(drag.scroll_origin - walk)
    }

    /// End the gesture (pointer up or pointer leaving the row)
    pub fn drag_end(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_cards_and_index_max() {
        let mut paginator = CarouselPaginator::new(20, 215);
        paginator.resize(880);

        assert_eq!(paginator.cards_visible(), 4);
        assert_eq!(paginator.index_max(), 16);
    }

    #[test]
    fn test_resize_wider_clamps_index() {
        let mut paginator = CarouselPaginator::new(20, 215);
        paginator.resize(880);

        for _ in 0..16 {
            paginator.next();
        }
        assert_eq!(paginator.index(), 16);
        assert!(!paginator.can_next());

        paginator.resize(2000);
        assert_eq!(paginator.cards_visible(), 9);
        assert_eq!(paginator.index_max(), 11);
        // Never left scrolled past the last valid page
        assert_eq!(paginator.index(), 11);
    }

    #[test]
    fn test_fewer_items_than_visible_disables_paging() {
        let mut paginator = CarouselPaginator::new(3, 215);
        paginator.resize(2000);

        assert_eq!(paginator.index_max(), 0);
        assert!(!paginator.can_back());
        assert!(!paginator.can_next());
        assert!(paginator.next().is_none());
    }

    #[test]
    fn test_navigation_moves_one_card_at_a_time() {
        let mut paginator = CarouselPaginator::new(20, 215);
        paginator.resize(880);

        assert!(!paginator.can_back());
        assert_eq!(paginator.next(), Some(215));
        assert_eq!(paginator.next(), Some(430));
        assert!(paginator.can_back());
        assert_eq!(paginator.back(), Some(215));
        assert_eq!(paginator.back(), Some(0));
        assert_eq!(paginator.back(), None);
    }

    #[test]
    fn test_viewport_resize_subtracts_chrome() {
        let mut paginator = CarouselPaginator::new(20, 215);
        paginator.resize_viewport(1000);

        // (1000 - 120) / 215 = 4
        assert_eq!(paginator.cards_visible(), 4);
    }

    #[test]
    fn test_drag_tracks_pointer_at_double_speed() {
        let mut paginator = CarouselPaginator::new(20, 215);
        paginator.resize(880);

        assert!(paginator.drag_move(500.0).is_none());

        paginator.drag_start(400.0, 1000.0);
        assert!(paginator.is_dragging());

        // Dragging right scrolls backwards, scaled by 2
        assert_eq!(paginator.drag_move(450.0), Some(900.0));
        // Dragging left of the start scrolls forwards
        assert_eq!(paginator.drag_move(300.0), Some(1200.0));

        paginator.drag_end();
        assert!(!paginator.is_dragging());
        assert!(paginator.drag_move(300.0).is_none());
    }
}
