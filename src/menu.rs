//! Paginated menu model.
//!
//! A menu is a fixed, ordered list of items with one highlighted entry.
//! The list is split into pages of `items_per_page` rows; the page shown is
//! always the one containing the highlighted item. Scrolling clamps at
//! both ends: wrapping from the last item to the first would make the
//! highlight jump across pages.

use heapless::Vec;

use crate::config::MAX_MENU_ITEMS;
use crate::error::Error;

/// What selecting an item does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    /// Switch to another top-level mode.
    Open(crate::mode::ModeKind),
    /// Leave the current menu for the clock face.
    Close,
    /// Value field; selecting it starts editing.
    Edit,
    /// Finish editing and commit.
    Done,
}

/// A value that can be stepped between inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Adjustable {
    pub value: i16,
    pub min: i16,
    pub max: i16,
}

impl Adjustable {
    /// `value` is clamped into `[min, max]`.
    pub const fn new(value: i16, min: i16, max: i16) -> Self {
        let value = if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        };
        Self { value, min, max }
    }

    /// Step by `delta`, saturating at the bounds. Returns whether the value
    /// changed.
    pub fn step(&mut self, delta: i16) -> bool {
        let next = self.value.saturating_add(delta).clamp(self.min, self.max);
        let changed = next != self.value;
        self.value = next;
        changed
    }

    /// Overwrite the value, clamped into range.
    pub fn set(&mut self, value: i16) {
        self.value = value.clamp(self.min, self.max);
    }
}

/// One labelled menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
    pub value: Option<Adjustable>,
}

impl MenuItem {
    pub const fn new(label: &'static str, action: MenuAction) -> Self {
        Self {
            label,
            action,
            value: None,
        }
    }

    /// An editable field bounded by `[min, max]`.
    pub const fn field(label: &'static str, value: i16, min: i16, max: i16) -> Self {
        Self {
            label,
            action: MenuAction::Edit,
            value: Some(Adjustable::new(value, min, max)),
        }
    }
}

/// How items are arranged on the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layout {
    /// One item per row below a header.
    Vertical {
        display_height: u16,
        header_height: u16,
        row_height: u16,
    },
    /// Vertical list with a configured row count.
    List { rows: usize },
    /// Items side by side, `page_size` at a time.
    Horizontal { page_size: usize },
}

impl Layout {
    /// Rows per page, or `None` if the layout cannot show a single item.
    pub fn items_per_page(&self) -> Option<usize> {
        let per_page = match *self {
            Layout::Vertical {
                display_height,
                header_height,
                row_height,
            } => {
                let usable = display_height.checked_sub(header_height)?;
                usize::from(usable.checked_div(row_height)?)
            }
            Layout::List { rows } => rows,
            Layout::Horizontal { page_size } => page_size,
        };
        (per_page > 0).then_some(per_page)
    }
}

/// Menu items plus highlight and paging state.
#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<MenuItem, MAX_MENU_ITEMS>,
    highlighted: usize,
    items_per_page: usize,
    layout: Layout,
}

impl Menu {
    /// Bind `items` to a layout. The highlight starts on the first item.
    pub fn build(items: &[MenuItem], layout: Layout) -> Result<Self, Error> {
        if items.is_empty() {
            return Err(Error::EmptyMenu);
        }
        let items_per_page = layout.items_per_page().ok_or(Error::InvalidLayout)?;
        let items = Vec::from_slice(items).map_err(|_| Error::TooManyItems)?;

        Ok(Self {
            items,
            highlighted: 0,
            items_per_page,
            layout,
        })
    }

    /// Move the highlight one item towards the top. No-op on the first item.
    pub fn scroll_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Move the highlight one item towards the bottom. No-op on the last item.
    pub fn scroll_down(&mut self) {
        if self.highlighted + 1 < self.items.len() {
            self.highlighted += 1;
        }
    }

    pub fn reset(&mut self) {
        self.highlighted = 0;
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    /// The highlighted item.
    ///
    /// # Panics
    ///
    /// If the highlight is out of range, which scrolling can never produce.
    pub fn highlighted_item(&self) -> &MenuItem {
        assert!(
            self.highlighted < self.items.len(),
            "menu highlight {} out of range ({} items)",
            self.highlighted,
            self.items.len()
        );
        &self.items[self.highlighted]
    }

    /// Step the highlighted item's value. Items without a value are left
    /// alone. Returns whether anything changed.
    pub fn adjust_highlighted(&mut self, delta: i16) -> bool {
        match self.items.get_mut(self.highlighted) {
            Some(MenuItem {
                value: Some(value), ..
            }) => value.step(delta),
            _ => false,
        }
    }

    /// Mutable access to the value of item `index`, if it has one.
    pub fn value_mut(&mut self, index: usize) -> Option<&mut Adjustable> {
        self.items.get_mut(index)?.value.as_mut()
    }

    pub fn item(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: a menu is built from at least one item.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Page containing the highlighted item.
    pub fn current_page(&self) -> usize {
        self.highlighted / self.items_per_page
    }

    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.items_per_page)
    }

    /// Items on the current page, for rendering. The last page may be short.
    pub fn visible_page(&self) -> Page<'_> {
        let number = self.current_page();
        let first = number * self.items_per_page;
        let end = (first + self.items_per_page).min(self.items.len());
        Page {
            number,
            count: self.page_count(),
            first_index: first,
            highlighted_slot: self.highlighted - first,
            items: &self.items[first..end],
        }
    }
}

/// One screenful of a [`Menu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    /// Zero-based page number.
    pub number: usize,
    /// Total pages in the menu.
    pub count: usize,
    /// Menu index of the first item on this page.
    pub first_index: usize,
    /// Slot of the highlighted item within `items`.
    pub highlighted_slot: usize,
    pub items: &'a [MenuItem],
}

/// A row of a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRow<'a> {
    /// Position on the page (0 = top / left).
    pub slot: usize,
    /// Position in the whole menu.
    pub index: usize,
    pub item: &'a MenuItem,
    pub highlighted: bool,
}

impl<'a> Page<'a> {
    pub fn rows(&self) -> impl Iterator<Item = PageRow<'a>> + 'a {
        let first = self.first_index;
        let highlighted = self.highlighted_slot;
        let items = self.items;
        items
            .iter()
            .enumerate()
            .map(move |(slot, item)| PageRow {
                slot,
                index: first + slot,
                item,
                highlighted: slot == highlighted,
            })
    }

    pub fn highlighted(&self) -> Option<&'a MenuItem> {
        self.items.get(self.highlighted_slot)
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIX: [MenuItem; 6] = [
        MenuItem::new("zero", MenuAction::Close),
        MenuItem::new("one", MenuAction::Close),
        MenuItem::new("two", MenuAction::Close),
        MenuItem::new("three", MenuAction::Close),
        MenuItem::new("four", MenuAction::Close),
        MenuItem::new("five", MenuAction::Close),
    ];

    fn six_by_three() -> Menu {
        Menu::build(&SIX, Layout::Horizontal { page_size: 3 }).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Construction
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn vertical_layout_divides_remaining_height() {
        let layout = Layout::Vertical {
            display_height: 48,
            header_height: 12,
            row_height: 12,
        };
        assert_eq!(layout.items_per_page(), Some(3));

        let layout = Layout::Vertical {
            display_height: 64,
            header_height: 12,
            row_height: 10,
        };
        assert_eq!(layout.items_per_page(), Some(5));
    }

    #[test]
    fn degenerate_layouts_are_rejected() {
        let too_tall = Layout::Vertical {
            display_height: 10,
            header_height: 12,
            row_height: 10,
        };
        assert_eq!(Menu::build(&SIX, too_tall).unwrap_err(), Error::InvalidLayout);

        let zero_row = Layout::Vertical {
            display_height: 64,
            header_height: 12,
            row_height: 0,
        };
        assert_eq!(Menu::build(&SIX, zero_row).unwrap_err(), Error::InvalidLayout);

        let zero_page = Layout::Horizontal { page_size: 0 };
        assert_eq!(Menu::build(&SIX, zero_page).unwrap_err(), Error::InvalidLayout);

        let zero_rows = Layout::List { rows: 0 };
        assert_eq!(Menu::build(&SIX, zero_rows).unwrap_err(), Error::InvalidLayout);
    }

    #[test]
    fn empty_and_oversized_menus_are_rejected() {
        let layout = Layout::Horizontal { page_size: 3 };
        assert_eq!(Menu::build(&[], layout).unwrap_err(), Error::EmptyMenu);

        let many = [MenuItem::new("x", MenuAction::Close); MAX_MENU_ITEMS + 1];
        assert_eq!(Menu::build(&many, layout).unwrap_err(), Error::TooManyItems);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Scrolling
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn scroll_down_saturates_at_last_item() {
        let mut menu = six_by_three();
        for _ in 0..menu.len() {
            menu.scroll_down();
        }
        assert_eq!(menu.highlighted_index(), 5);
        menu.scroll_down();
        assert_eq!(menu.highlighted_index(), 5);
    }

    #[test]
    fn scroll_up_at_top_is_noop() {
        let mut menu = six_by_three();
        menu.scroll_up();
        assert_eq!(menu.highlighted_index(), 0);
        menu.scroll_down();
        menu.scroll_up();
        assert_eq!(menu.highlighted_index(), 0);
    }

    #[test]
    fn reset_returns_to_first_item() {
        let mut menu = six_by_three();
        menu.scroll_down();
        menu.scroll_down();
        menu.reset();
        assert_eq!(menu.highlighted_index(), 0);
        assert_eq!(menu.current_page(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Paging
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn highlight_four_shows_second_page() {
        let mut menu = six_by_three();
        for _ in 0..4 {
            menu.scroll_down();
        }
        let page = menu.visible_page();
        assert_eq!(page.number, 1);
        assert_eq!(page.first_index, 3);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.highlighted_slot, 1);
        assert_eq!(page.highlighted().unwrap().label, "four");

        let rows: heapless::Vec<PageRow<'_>, 3> = page.rows().collect();
        assert_eq!(
            rows.iter().map(|r| r.index).collect::<heapless::Vec<_, 3>>().as_slice(),
            &[3, 4, 5]
        );
        assert!(rows[1].highlighted);
        assert!(!rows[0].highlighted && !rows[2].highlighted);
    }

    #[test]
    fn last_page_is_short() {
        let items = [MenuItem::new("x", MenuAction::Close); 5];
        let mut menu = Menu::build(&items, Layout::Horizontal { page_size: 3 }).unwrap();
        assert_eq!(menu.page_count(), 2);
        for _ in 0..4 {
            menu.scroll_down();
        }
        let page = menu.visible_page();
        assert_eq!(page.number, 1);
        assert_eq!(page.items.len(), 2);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn page_follows_highlight_across_boundary() {
        let mut menu = six_by_three();
        menu.scroll_down();
        menu.scroll_down();
        assert_eq!(menu.current_page(), 0);
        menu.scroll_down();
        assert_eq!(menu.current_page(), 1);
        menu.scroll_up();
        assert_eq!(menu.current_page(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Values
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn adjustable_saturates_at_bounds() {
        let mut minute = Adjustable::new(58, 0, 59);
        assert!(minute.step(1));
        assert!(!minute.step(1));
        assert_eq!(minute.value, 59);

        let mut month = Adjustable::new(1, 1, 12);
        assert!(!month.step(-1));
        assert_eq!(month.value, 1);

        assert_eq!(Adjustable::new(40, 0, 23).value, 23);
    }

    #[test]
    fn adjust_only_touches_highlighted_field() {
        let items = [
            MenuItem::field("Hour", 10, 0, 23),
            MenuItem::field("Minute", 30, 0, 59),
            MenuItem::new("Done", MenuAction::Done),
        ];
        let mut menu = Menu::build(&items, Layout::Horizontal { page_size: 3 }).unwrap();
        assert!(menu.adjust_highlighted(1));
        assert_eq!(menu.item(0).unwrap().value.unwrap().value, 11);
        assert_eq!(menu.item(1).unwrap().value.unwrap().value, 30);

        menu.scroll_down();
        menu.scroll_down();
        assert!(!menu.adjust_highlighted(1));
    }
}
