use std::any::Any;
use std::sync::Arc;

use autobind_core::Handled;
use parking_lot::Mutex;

use super::*;
use crate::model::{selector_fn, ChangeKind};

const ITEM_LAYOUT: LayoutId = LayoutId(100);
const EMPTY_LAYOUT: LayoutId = LayoutId(200);
const HEADER_LAYOUT: LayoutId = LayoutId(300);
const FOOTER_LAYOUT: LayoutId = LayoutId(400);

const TITLE: ViewId = ViewId(1);
const ICON: ViewId = ViewId(2);
const BUTTON: ViewId = ViewId(3);

#[derive(Default)]
struct Label {
    text: String,
    on_click: Option<ViewClickHandler>,
}

impl TextView for Label {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

impl View for Label {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_text(&mut self) -> Option<&mut dyn TextView> {
        Some(self)
    }

    fn set_on_click(&mut self, handler: ViewClickHandler) {
        self.on_click = Some(handler);
    }
}

#[derive(Default)]
struct Icon {
    source: Option<String>,
}

impl ImageView for Icon {
    fn load(&mut self, source: &str) {
        self.source = Some(source.to_string());
    }
}

impl View for Icon {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_image(&mut self) -> Option<&mut dyn ImageView> {
        Some(self)
    }
}

#[derive(Default)]
struct TestRow {
    layout: Option<LayoutId>,
    title: Option<Label>,
    icon: Option<Icon>,
    on_click: Option<ClickHandler>,
    on_long_press: Option<LongPressHandler>,
    header_binds: usize,
}

impl TestRow {
    fn content() -> Self {
        Self {
            layout: Some(ITEM_LAYOUT),
            title: Some(Label::default()),
            icon: Some(Icon::default()),
            ..Default::default()
        }
    }

    fn title_only() -> Self {
        Self {
            title: Some(Label::default()),
            ..Default::default()
        }
    }

    fn title(&self) -> &str {
        self.title.as_ref().map_or("", |label| label.text.as_str())
    }

    fn click(&self) -> bool {
        match self.on_click.clone() {
            Some(handler) => {
                handler(self);
                true
            }
            None => false,
        }
    }

    fn long_press(&self) -> bool {
        self.on_long_press.clone().is_some_and(|handler| handler(self))
    }
}

impl RowView for TestRow {
    fn find_view(&mut self, id: ViewId) -> Option<&mut dyn View> {
        match id {
            TITLE => self.title.as_mut().map(|label| label as &mut dyn View),
            ICON => self.icon.as_mut().map(|icon| icon as &mut dyn View),
            _ => None,
        }
    }

    fn set_on_click(&mut self, handler: ClickHandler) {
        self.on_click = Some(handler);
    }

    fn set_on_long_press(&mut self, handler: LongPressHandler) {
        self.on_long_press = Some(handler);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn inflate(layout: LayoutId) -> Option<Box<dyn RowView>> {
    match layout {
        ITEM_LAYOUT | EMPTY_LAYOUT | HEADER_LAYOUT | FOOTER_LAYOUT => Some(Box::new(TestRow {
            layout: Some(layout),
            ..TestRow::content()
        })),
        _ => None,
    }
}

fn adapter_with(items: &[&'static str]) -> AutoAdapter<&'static str> {
    let adapter = AutoAdapter::with_layout(ITEM_LAYOUT);
    adapter.items().extend(items.iter().copied());
    adapter
}

fn count_invalidations(adapter: &AutoAdapter<&'static str>) -> Arc<Mutex<usize>> {
    let count = Arc::new(Mutex::new(0));
    let recv = count.clone();
    adapter.data_set_changed().connect(move |_, _| *recv.lock() += 1);
    count
}

// -------------------------------------------------------------------------
// Row count and kinds
// -------------------------------------------------------------------------

#[test]
fn test_plain_list_maps_one_to_one() {
    let adapter = AutoAdapter::with_selector(selector_fn(|n: &u32| LayoutId(*n)));
    adapter.items().extend([7, 8, 9]);

    assert_eq!(adapter.row_count(), 3);
    for (position, n) in [7, 8, 9].into_iter().enumerate() {
        assert_eq!(adapter.row_kind(position), Ok(RowKind::Content(LayoutId(n))));
    }
}

#[test]
fn test_default_layout() {
    let adapter = AutoAdapter::new();
    adapter.items().push("a");
    assert_eq!(
        adapter.row_kind(0),
        Ok(RowKind::Content(LayoutId::SIMPLE_LIST_ITEM))
    );
}

#[test]
fn test_empty_list_without_empty_layout() {
    let adapter = adapter_with(&[]);
    assert_eq!(adapter.row_count(), 0);
    assert!(!adapter.is_showing_empty());
    assert!(matches!(
        adapter.row_kind(0),
        Err(AdapterError::PositionOutOfRange { position: 0, row_count: 0 })
    ));
}

#[test]
fn test_empty_state_overrides_header_and_footer() {
    let adapter = adapter_with(&[]);
    adapter.with_header_layout(HEADER_LAYOUT);
    adapter.with_footer_layout(FOOTER_LAYOUT);
    adapter.when_empty(EMPTY_LAYOUT);

    assert!(adapter.is_showing_empty());
    assert_eq!(adapter.row_count(), 1);
    assert_eq!(adapter.row_kind(0), Ok(RowKind::Empty));

    adapter.items().push("a");
    assert!(!adapter.is_showing_empty());
    assert_eq!(adapter.row_count(), 3);
    assert_eq!(adapter.row_kind(0), Ok(RowKind::Header));
}

#[test]
fn test_header_and_footer_on_empty_list_without_empty_layout() {
    let adapter = adapter_with(&[]);
    adapter.with_header_layout(HEADER_LAYOUT);
    adapter.with_footer_layout(FOOTER_LAYOUT);

    assert_eq!(adapter.row_count(), 2);
    assert_eq!(adapter.row_kind(0), Ok(RowKind::Header));
    assert_eq!(adapter.row_kind(1), Ok(RowKind::Footer));
}

#[test]
fn test_footer_position_without_header() {
    let adapter = adapter_with(&["a", "b"]);
    adapter.with_footer_layout(FOOTER_LAYOUT);

    assert_eq!(adapter.row_count(), 3);
    assert_eq!(adapter.row_kind(0), Ok(RowKind::Content(ITEM_LAYOUT)));
    assert_eq!(adapter.row_kind(2), Ok(RowKind::Footer));
}

#[test]
fn test_header_wins_position_zero() {
    let adapter = adapter_with(&["only"]);
    adapter.with_header_layout(HEADER_LAYOUT);

    assert_eq!(adapter.row_count(), 2);
    assert_eq!(adapter.row_kind(0), Ok(RowKind::Header));
    assert_eq!(adapter.row_kind(1), Ok(RowKind::Content(ITEM_LAYOUT)));
    assert!(adapter.row_kind(2).is_err());
}

#[test]
fn test_toggle_header_and_footer() {
    let adapter = adapter_with(&["a"]);
    adapter.with_header_layout(HEADER_LAYOUT);
    adapter.with_footer_layout(FOOTER_LAYOUT);
    assert_eq!(adapter.row_count(), 3);

    adapter.set_header_enabled(false);
    assert!(!adapter.has_header());
    assert!(!adapter.header_enabled());
    assert_eq!(adapter.row_count(), 2);
    assert_eq!(adapter.row_kind(0), Ok(RowKind::Content(ITEM_LAYOUT)));
    assert_eq!(adapter.row_kind(1), Ok(RowKind::Footer));

    adapter.set_footer_enabled(false);
    assert_eq!(adapter.row_count(), 1);

    adapter.set_header_enabled(true);
    adapter.set_footer_enabled(true);
    assert_eq!(adapter.row_count(), 3);
    assert_eq!(adapter.row_kind(0), Ok(RowKind::Header));
    assert_eq!(adapter.row_kind(2), Ok(RowKind::Footer));
}

#[test]
fn test_enabled_without_configuration_adds_nothing() {
    let adapter = adapter_with(&["a"]);
    assert!(adapter.header_enabled());
    assert!(adapter.footer_enabled());
    assert!(!adapter.has_header());
    assert_eq!(adapter.row_count(), 1);
}

#[test]
fn test_remove_header_and_footer() {
    let adapter = adapter_with(&["a"]);
    adapter.with_header_layout(HEADER_LAYOUT);
    adapter.with_footer_layout(FOOTER_LAYOUT);

    adapter.remove_header();
    adapter.remove_footer();
    assert_eq!(adapter.row_count(), 1);
}

// -------------------------------------------------------------------------
// Invalidation
// -------------------------------------------------------------------------

#[test]
fn test_each_mutation_invalidates_once() {
    let adapter = adapter_with(&[]);
    let invalidations = count_invalidations(&adapter);

    adapter.items().push("a");
    assert_eq!(*invalidations.lock(), 1);
    assert_eq!(adapter.row_count(), 1);

    adapter.items().extend(["b", "c"]);
    adapter.items().remove(0).unwrap();
    adapter.items().clear();
    assert_eq!(*invalidations.lock(), 4);
}

#[test]
fn test_row_count_is_current_inside_invalidation() {
    let adapter = Arc::new(adapter_with(&["a"]));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let weak = Arc::downgrade(&adapter);
    let recv = seen.clone();
    adapter.data_set_changed().connect(move |_, _| {
        if let Some(adapter) = weak.upgrade() {
            recv.lock().push(adapter.row_count());
        }
    });

    adapter.items().push("b");
    adapter.items().remove(0).unwrap();
    assert_eq!(*seen.lock(), vec![2, 1]);
}

#[test]
fn test_when_empty_invalidates() {
    let adapter = adapter_with(&[]);
    let invalidations = count_invalidations(&adapter);

    adapter.when_empty(EMPTY_LAYOUT);
    assert_eq!(*invalidations.lock(), 1);
    adapter.clear_empty();
    assert_eq!(*invalidations.lock(), 2);
    assert_eq!(adapter.row_count(), 0);
}

#[test]
fn test_header_changes_do_not_invalidate() {
    let adapter = adapter_with(&["a"]);
    let invalidations = count_invalidations(&adapter);

    adapter.with_header_layout(HEADER_LAYOUT);
    adapter.set_header_enabled(false);
    assert_eq!(*invalidations.lock(), 0);

    adapter.notify_data_set_changed();
    assert_eq!(*invalidations.lock(), 1);
}

#[test]
fn test_update_items() {
    let adapter = adapter_with(&["old"]);
    let kinds = Arc::new(Mutex::new(Vec::new()));

    let recv = kinds.clone();
    adapter
        .items()
        .collection_changed()
        .connect(move |_, change| recv.lock().push(change.kind));

    adapter.update_items(Some(vec!["x", "y"]));
    assert_eq!(adapter.items().to_vec(), vec!["x", "y"]);

    adapter.update_items(None);
    assert!(adapter.items().is_empty());

    assert_eq!(
        *kinds.lock(),
        vec![ChangeKind::Reset, ChangeKind::Insert, ChangeKind::Reset]
    );
}

// -------------------------------------------------------------------------
// Binding
// -------------------------------------------------------------------------

#[test]
fn test_bind_with_header_offsets_position() {
    let adapter = adapter_with(&["a", "b"]);
    adapter.with_header_layout(HEADER_LAYOUT);
    let bound = Arc::new(Mutex::new(Vec::new()));

    let recv = bound.clone();
    adapter.bind_view(TITLE, move |_, item, position, _| {
        recv.lock().push((*item, position));
    });

    assert_eq!(adapter.row_count(), 3);
    let mut row = TestRow::content();
    adapter.bind(&mut row, 1);
    adapter.bind(&mut row, 2);

    assert_eq!(*bound.lock(), vec![("a", 0), ("b", 1)]);
}

#[test]
fn test_bind_footer_runs_footer_callback_only() {
    let adapter = adapter_with(&["a"]);
    adapter.with_header_layout(HEADER_LAYOUT);
    adapter.with_footer_layout(FOOTER_LAYOUT);
    adapter.bind_text(TITLE, |item| item.to_uppercase());

    let footer_binds = Arc::new(Mutex::new(0));
    let recv = footer_binds.clone();
    adapter.bind_footer(move |_| *recv.lock() += 1);

    assert_eq!(adapter.row_kind(2), Ok(RowKind::Footer));
    let mut footer = TestRow::content();
    adapter.bind(&mut footer, 2);

    assert_eq!(*footer_binds.lock(), 1);
    assert_eq!(footer.title(), "");
    assert!(footer.on_click.is_none());
}

#[test]
fn test_bind_header_callback_receives_row() {
    let adapter = adapter_with(&["a"]);
    adapter.with_header_layout(HEADER_LAYOUT);
    adapter.bind_text(TITLE, |item| item.to_string());
    adapter.bind_header(|row| {
        if let Some(row) = row.as_any_mut().downcast_mut::<TestRow>() {
            row.header_binds += 1;
        }
    });

    let mut header = TestRow::content();
    adapter.bind(&mut header, 0);
    adapter.bind(&mut header, 0);

    assert_eq!(header.header_binds, 2);
    assert_eq!(header.title(), "");
}

#[test]
fn test_header_without_callback_is_left_alone() {
    let adapter = adapter_with(&["a"]);
    adapter.with_header_layout(HEADER_LAYOUT);
    adapter.bind_text(TITLE, |item| item.to_string());

    let mut header = TestRow::content();
    adapter.bind(&mut header, 0);
    assert_eq!(header.title(), "");
    assert!(header.on_click.is_none());
}

#[test]
fn test_empty_state_row_goes_to_header_binder() {
    let adapter = adapter_with(&[]);
    adapter.when_empty(EMPTY_LAYOUT);
    adapter.with_header_layout(HEADER_LAYOUT);
    adapter.with_footer_layout(FOOTER_LAYOUT);
    adapter.bind_text(TITLE, |item| item.to_string());

    let header_binds = Arc::new(Mutex::new(0));
    let footer_binds = Arc::new(Mutex::new(0));
    let recv = header_binds.clone();
    adapter.bind_header(move |_| *recv.lock() += 1);
    let recv = footer_binds.clone();
    adapter.bind_footer(move |_| *recv.lock() += 1);

    assert_eq!(adapter.row_kind(0), Ok(RowKind::Empty));
    let mut row = TestRow::content();
    adapter.bind(&mut row, 0);

    assert_eq!(*header_binds.lock(), 1);
    assert_eq!(*footer_binds.lock(), 0);
    assert_eq!(row.title(), "");
    assert!(row.on_click.is_none());
}

#[test]
fn test_empty_state_row_goes_to_footer_binder_without_header() {
    let adapter = adapter_with(&[]);
    adapter.when_empty(EMPTY_LAYOUT);
    adapter.with_footer_layout(FOOTER_LAYOUT);

    let footer_binds = Arc::new(Mutex::new(0));
    let recv = footer_binds.clone();
    adapter.bind_footer(move |_| *recv.lock() += 1);

    assert_eq!(adapter.row_count(), 1);
    let mut row = TestRow::content();
    adapter.bind(&mut row, 0);
    assert_eq!(*footer_binds.lock(), 1);

    adapter.set_footer_enabled(false);
    adapter.bind(&mut row, 0);
    assert_eq!(*footer_binds.lock(), 1);
}

#[test]
fn test_empty_state_row_without_synthetic_rows_is_untouched() {
    let adapter = adapter_with(&[]);
    adapter.when_empty(EMPTY_LAYOUT);
    adapter.bind_text(TITLE, |item| item.to_string());

    let mut row = TestRow::content();
    adapter.bind(&mut row, 0);
    assert_eq!(row.title(), "");
    assert!(row.on_click.is_none());
    assert!(row.on_long_press.is_none());
}

#[test]
fn test_bind_past_end_is_a_no_op() {
    let adapter = adapter_with(&["a"]);
    adapter.bind_text(TITLE, |item| item.to_string());

    let mut row = TestRow::content();
    adapter.bind(&mut row, 5);
    assert_eq!(row.title(), "");
    assert!(row.on_click.is_none());
}

#[test]
fn test_rules_apply_in_registration_order() {
    let adapter = adapter_with(&["a"]);
    let order = Arc::new(Mutex::new(Vec::new()));

    for (step, id) in [(1, ICON), (2, TITLE), (3, ICON)] {
        let recv = order.clone();
        adapter.bind_view(id, move |_, _, _, _| recv.lock().push(step));
    }
    assert_eq!(adapter.binding_count(), 3);

    let mut row = TestRow::content();
    adapter.bind(&mut row, 0);
    adapter.bind(&mut row, 0);

    assert_eq!(*order.lock(), vec![1, 2, 3, 1, 2, 3]);
}

#[test]
fn test_missing_element_is_skipped() {
    let adapter = adapter_with(&["cat"]);
    adapter.bind_text(TITLE, |item| item.to_string());
    adapter.bind_image(ICON, |item| format!("{item}.png"));

    let mut full = TestRow::content();
    adapter.bind(&mut full, 0);
    assert_eq!(full.title(), "cat");
    assert_eq!(full.icon.as_ref().and_then(|icon| icon.source.as_deref()), Some("cat.png"));

    let mut partial = TestRow::title_only();
    adapter.bind(&mut partial, 0);
    assert_eq!(partial.title(), "cat");
    assert!(partial.icon.is_none());
}

#[test]
fn test_text_rule_ignores_elements_without_text() {
    let adapter = adapter_with(&["cat"]);
    // ICON is an image element; a text rule aimed at it does nothing.
    adapter.bind_text(ICON, |item| item.to_string());

    let mut row = TestRow::content();
    adapter.bind(&mut row, 0);
    assert_eq!(row.icon.as_ref().and_then(|icon| icon.source.clone()), None);
}

#[test]
fn test_bind_custom_downcasts() {
    let adapter = adapter_with(&["a", "bb"]);
    adapter.bind_custom::<Label, _>(TITLE, |label, item, position, adapter| {
        label.text = format!("{item}:{position}/{}", adapter.items().len());
    });
    // Wrong element type: never runs.
    adapter.bind_custom::<Icon, _>(TITLE, |icon, _, _, _| {
        icon.source = Some("unexpected".into());
    });

    let mut row = TestRow::content();
    adapter.bind(&mut row, 1);
    assert_eq!(row.title(), "bb:1/2");
    assert!(row.icon.as_ref().is_some_and(|icon| icon.source.is_none()));
}

#[test]
fn test_rebinding_recycled_row() {
    let adapter = adapter_with(&["first", "second"]);
    adapter.bind_text(TITLE, |item| item.to_string());

    let mut row = TestRow::content();
    adapter.bind(&mut row, 0);
    assert_eq!(row.title(), "first");
    adapter.bind(&mut row, 1);
    assert_eq!(row.title(), "second");
}

#[test]
fn test_clear_bindings() {
    let adapter = adapter_with(&["a"]);
    adapter.bind_text(TITLE, |item| item.to_string());
    adapter.clear_bindings();
    assert_eq!(adapter.binding_count(), 0);

    let mut row = TestRow::content();
    adapter.bind(&mut row, 0);
    assert_eq!(row.title(), "");
}

#[test]
fn test_rule_may_read_adapter_during_bind() {
    let adapter = adapter_with(&["a", "b", "c"]);
    adapter.with_footer_layout(FOOTER_LAYOUT);
    adapter.bind_text(TITLE, |item| item.to_string());
    adapter.bind_view(TITLE, |view, _, position, adapter| {
        let total = adapter.row_count();
        if let Some(text) = view.as_text() {
            text.set_text(&format!("{position} of {total}"));
        }
    });

    let mut row = TestRow::content();
    adapter.bind(&mut row, 2);
    assert_eq!(row.title(), "2 of 4");
}

// -------------------------------------------------------------------------
// Click fan-out
// -------------------------------------------------------------------------

#[test]
fn test_click_emits_item_once() {
    let adapter = adapter_with(&["a", "b"]);
    adapter.with_header_layout(HEADER_LAYOUT);
    let clicks = Arc::new(Mutex::new(Vec::new()));

    let recv = clicks.clone();
    adapter.item_clicked().connect(move |sender, event| {
        let layout = sender
            .as_any()
            .downcast_ref::<TestRow>()
            .and_then(|row| row.layout);
        recv.lock().push((event.clone(), layout));
    });

    let mut row = TestRow::content();
    adapter.bind(&mut row, 2);
    assert!(row.click());

    assert_eq!(
        *clicks.lock(),
        vec![(
            ItemClickEvent {
                item: "b",
                position: 1
            },
            Some(ITEM_LAYOUT)
        )]
    );
}

#[test]
fn test_rebind_replaces_click_handler() {
    let adapter = adapter_with(&["a", "b"]);
    let clicks = Arc::new(Mutex::new(Vec::new()));

    let recv = clicks.clone();
    adapter
        .item_clicked()
        .connect(move |_, event| recv.lock().push(event.item));

    let mut row = TestRow::content();
    adapter.bind(&mut row, 0);
    adapter.bind(&mut row, 1);
    row.click();

    assert_eq!(*clicks.lock(), vec!["b"]);
}

#[test]
fn test_long_press_handled_only_with_subscriber() {
    let adapter = adapter_with(&["a"]);
    let mut row = TestRow::content();
    adapter.bind(&mut row, 0);

    assert!(!row.long_press());

    let presses = Arc::new(Mutex::new(Vec::new()));
    let recv = presses.clone();
    let id = adapter
        .item_long_pressed()
        .connect(move |_, event| recv.lock().push(event.item));
    assert!(row.long_press());
    assert_eq!(*presses.lock(), vec!["a"]);

    adapter.item_long_pressed().disconnect(id);
    assert!(!row.long_press());
}

#[test]
fn test_long_press_handler_may_decline() {
    let adapter = adapter_with(&["keep", "drop"]);
    adapter
        .item_long_pressed()
        .connect_handler(|_, event| Handled::from(event.item == "drop"));

    let mut row = TestRow::content();
    adapter.bind(&mut row, 0);
    assert!(!row.long_press());
    adapter.bind(&mut row, 1);
    assert!(row.long_press());
}

#[test]
fn test_click_and_long_press_are_independent() {
    let adapter = adapter_with(&["a"]);
    let clicks = Arc::new(Mutex::new(0));

    let recv = clicks.clone();
    adapter.item_clicked().connect(move |_, _| *recv.lock() += 1);

    let mut row = TestRow::content();
    adapter.bind(&mut row, 0);
    assert!(!row.long_press());
    assert_eq!(*clicks.lock(), 0);
}

#[test]
fn test_bind_click_on_sub_element() {
    let adapter = adapter_with(&["a", "b"]);
    let taps = Arc::new(Mutex::new(Vec::new()));

    let recv = taps.clone();
    adapter.bind_click(TITLE, move |item, position| recv.lock().push((*item, position)));
    // BUTTON is not part of TestRow; the rule is skipped.
    adapter.bind_click(BUTTON, |_, _| panic!("no such element"));

    let mut row = TestRow::content();
    adapter.bind(&mut row, 1);
    let handler = row.title.as_ref().and_then(|label| label.on_click.clone());
    let handler = handler.expect("click handler installed");
    handler();

    assert_eq!(*taps.lock(), vec![("b", 1)]);
}

// -------------------------------------------------------------------------
// Row creation
// -------------------------------------------------------------------------

fn layout_of(row: &dyn RowView) -> Option<LayoutId> {
    row.as_any().downcast_ref::<TestRow>().and_then(|row| row.layout)
}

#[test]
fn test_create_rows_from_layouts() {
    let adapter = adapter_with(&["a"]);
    adapter.with_header_layout(HEADER_LAYOUT);
    adapter.with_footer_layout(FOOTER_LAYOUT);
    adapter.when_empty(EMPTY_LAYOUT);

    let content = adapter.create_row(RowKind::Content(ITEM_LAYOUT), &inflate).unwrap();
    let header = adapter.create_row(RowKind::Header, &inflate).unwrap();
    let footer = adapter.create_row(RowKind::Footer, &inflate).unwrap();
    let empty = adapter.create_row(RowKind::Empty, &inflate).unwrap();

    assert_eq!(layout_of(content.as_ref()), Some(ITEM_LAYOUT));
    assert_eq!(layout_of(header.as_ref()), Some(HEADER_LAYOUT));
    assert_eq!(layout_of(footer.as_ref()), Some(FOOTER_LAYOUT));
    assert_eq!(layout_of(empty.as_ref()), Some(EMPTY_LAYOUT));

    // Layout-backed synthetic rows can be inflated repeatedly.
    assert!(adapter.create_row(RowKind::Header, &inflate).is_ok());
}

#[test]
fn test_create_unconfigured_kind_fails() {
    let adapter = adapter_with(&["a"]);
    assert_eq!(
        adapter.create_row(RowKind::Header, &inflate).err(),
        Some(AdapterError::Misconfigured(RowKind::Header))
    );
    assert_eq!(
        adapter.create_row(RowKind::Empty, &inflate).err(),
        Some(AdapterError::Misconfigured(RowKind::Empty))
    );
}

#[test]
fn test_create_unknown_layout_fails() {
    let adapter = adapter_with(&["a"]);
    assert_eq!(
        adapter.create_row(RowKind::Content(LayoutId(999)), &inflate).err(),
        Some(AdapterError::UnknownLayout(LayoutId(999)))
    );
}

#[test]
fn test_header_instance_is_single_use() {
    let adapter = adapter_with(&["a"]);
    adapter.with_header(Box::new(TestRow {
        layout: Some(LayoutId(42)),
        ..TestRow::title_only()
    }));
    assert!(adapter.has_header());

    let header = adapter.create_row(RowKind::Header, &inflate).unwrap();
    assert_eq!(layout_of(header.as_ref()), Some(LayoutId(42)));
    assert_eq!(
        adapter.create_row(RowKind::Header, &inflate).err(),
        Some(AdapterError::InstanceInUse(RowKind::Header))
    );

    // Still configured after being handed out.
    assert_eq!(adapter.row_count(), 2);
    assert_eq!(adapter.row_kind(0), Ok(RowKind::Header));

    adapter.with_header(Box::new(TestRow::title_only()));
    assert!(adapter.create_row(RowKind::Header, &inflate).is_ok());
}

#[test]
fn test_footer_instance() {
    let adapter = adapter_with(&[]);
    adapter.with_footer(Box::new(TestRow::title_only()));

    assert_eq!(adapter.row_count(), 1);
    assert_eq!(adapter.row_kind(0), Ok(RowKind::Footer));
    assert!(adapter.create_row(RowKind::Footer, &inflate).is_ok());
    assert!(adapter.create_row(RowKind::Footer, &inflate).is_err());
}

// -------------------------------------------------------------------------
// Builder
// -------------------------------------------------------------------------

#[test]
fn test_builder_configures_everything() {
    let footer_binds = Arc::new(Mutex::new(0));
    let recv = footer_binds.clone();

    let adapter = AutoAdapter::<&'static str>::builder()
        .selector(|item: &&'static str| if item.len() > 1 { LayoutId(2) } else { LayoutId(1) })
        .items(vec!["a", "bb"])
        .when_empty(EMPTY_LAYOUT)
        .header_layout(HEADER_LAYOUT)
        .footer_layout(FOOTER_LAYOUT)
        .footer_enabled(false)
        .bind_footer(move |_| *recv.lock() += 1)
        .build();

    assert_eq!(adapter.row_count(), 3);
    assert_eq!(adapter.row_kind(1), Ok(RowKind::Content(LayoutId(1))));
    assert_eq!(adapter.row_kind(2), Ok(RowKind::Content(LayoutId(2))));

    adapter.set_footer_enabled(true);
    let mut footer = TestRow::content();
    adapter.bind(&mut footer, 3);
    assert_eq!(*footer_binds.lock(), 1);

    adapter.items().clear();
    assert_eq!(adapter.row_kind(0), Ok(RowKind::Empty));
}

#[test]
fn test_builder_initial_items_are_silent() {
    let adapter = AutoAdapter::builder().items(vec!["a", "b"]).build();
    let invalidations = count_invalidations(&adapter);
    assert_eq!(adapter.row_count(), 2);
    assert_eq!(*invalidations.lock(), 0);
}

#[test]
fn test_builder_header_instance() {
    let adapter = AutoAdapter::<&'static str>::builder()
        .header(Box::new(TestRow::title_only()))
        .header_enabled(false)
        .build();

    assert!(!adapter.has_header());
    adapter.set_header_enabled(true);
    assert_eq!(adapter.row_kind(0), Ok(RowKind::Header));
    assert!(adapter.create_row(RowKind::Header, &inflate).is_ok());
}

// -------------------------------------------------------------------------
// Logging
// -------------------------------------------------------------------------

#[derive(Clone, Default)]
struct SpanRecorder(Arc<Mutex<Vec<(&'static str, &'static str)>>>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for SpanRecorder {
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = attrs.metadata();
        self.0.lock().push((metadata.target(), metadata.name()));
    }
}

#[test]
fn test_bind_span_uses_adapter_target() {
    use autobind_core::logging::{span_names, targets};
    use tracing_subscriber::layer::SubscriberExt;

    let recorder = SpanRecorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());

    let adapter = adapter_with(&["a"]);
    let mut row = TestRow::content();
    tracing::subscriber::with_default(subscriber, || adapter.bind(&mut row, 0));

    assert!(recorder
        .0
        .lock()
        .contains(&(targets::ADAPTER, span_names::BIND)));
}
