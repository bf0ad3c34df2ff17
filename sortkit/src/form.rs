//! Product editing form.
//!
//! [`ProductForm`] loads categories and, when editing, the product from a
//! [`ProductStore`], keeps field values the way text inputs would (as
//! strings) and collects them into a [`ProductData`] payload on save. Images
//! live in a [`SortableList`] so their order can be changed by dragging.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use domlet::{Element, Event, LayoutResult, RenderSurface};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::list::{DELETE_HANDLE, GRAB_HANDLE, SortableList};
use crate::source::FetchError;

pub const FORM: &str = "product-form";
pub const IMAGE_LIST: &str = "image-list";
pub const NOT_FOUND: &str = "not-found";

/// An uploaded product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub source: String,
}

impl ProductImage {
    pub fn new(url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }
}

/// Product payload exchanged with the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub quantity: i64,
    pub subcategory: String,
    pub status: i64,
    pub price: i64,
    pub discount: i64,
    pub images: Vec<ProductImage>,
}

impl Default for ProductData {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            quantity: 1,
            subcategory: String::new(),
            status: 1,
            price: 100,
            discount: 0,
            images: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

/// Editable scalar fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Title,
    Description,
    Quantity,
    Subcategory,
    Status,
    Price,
    Discount,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Title,
        FormField::Description,
        FormField::Quantity,
        FormField::Subcategory,
        FormField::Status,
        FormField::Price,
        FormField::Discount,
    ];

    /// Input name, also used as the element id.
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Quantity => "quantity",
            FormField::Subcategory => "subcategory",
            FormField::Status => "status",
            FormField::Price => "price",
            FormField::Discount => "discount",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FormField::Quantity | FormField::Status | FormField::Price | FormField::Discount
        )
    }

    /// Raw input value of this field in `data`.
    fn value_of(&self, data: &ProductData) -> String {
        match self {
            FormField::Title => data.title.clone(),
            FormField::Description => data.description.clone(),
            FormField::Quantity => data.quantity.to_string(),
            FormField::Subcategory => data.subcategory.clone(),
            FormField::Status => data.status.to_string(),
            FormField::Price => data.price.to_string(),
            FormField::Discount => data.discount.to_string(),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Leading integer of `input`, or 0 when there is none.
///
/// Surrounding whitespace and trailing garbage are ignored: `" 12kg"` is 12.
pub fn parse_int(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits = trimmed[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed.len(), |end| end + sign_len);
    trimmed[..digits].parse().unwrap_or(0)
}

/// Backend the form loads from and saves to.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn categories(&self) -> std::result::Result<Vec<Category>, FetchError>;

    /// Products matching `id`; empty when there is none.
    async fn product(&self, id: &str) -> std::result::Result<Vec<ProductData>, FetchError>;

    async fn create(
        &self,
        product: &ProductData,
    ) -> std::result::Result<ProductData, FetchError>;

    async fn update(
        &self,
        product: &ProductData,
    ) -> std::result::Result<ProductData, FetchError>;
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// A new product was created.
    ProductSaved(ProductData),
    /// An existing product was updated.
    ProductUpdated(ProductData),
}

impl FormEvent {
    pub fn product(&self) -> &ProductData {
        match self {
            FormEvent::ProductSaved(product) | FormEvent::ProductUpdated(product) => product,
        }
    }
}

struct FormInner {
    values: BTreeMap<FormField, String>,
    categories: Vec<Category>,
    destroyed: bool,
    surface: Box<dyn RenderSurface>,
}

impl FormInner {
    fn options(&self) -> Vec<(String, String)> {
        subcategory_options(&self.categories)
    }

    /// Selected subcategory; an unknown value selects the first option.
    fn subcategory(&self) -> String {
        let options = self.options();
        let current = self
            .values
            .get(&FormField::Subcategory)
            .cloned()
            .unwrap_or_default();
        if options.iter().any(|(value, _)| *value == current) {
            return current;
        }
        options
            .into_iter()
            .next()
            .map(|(value, _)| value)
            .unwrap_or_default()
    }

    fn paint(&mut self) {
        if self.destroyed || !self.surface.is_mounted() {
            return;
        }
        let root = form_element(&self.values, &self.options(), &self.subcategory());
        self.surface.mount(root);
    }
}

/// A product creation and editing form.
///
/// Cheap-clone handle; no lock is held while a store request is pending.
#[derive(Clone)]
pub struct ProductForm {
    product_id: Option<String>,
    store: Arc<dyn ProductStore>,
    images: SortableList,
    inner: Arc<RwLock<FormInner>>,
}

impl fmt::Debug for ProductForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductForm")
            .field("product_id", &self.product_id)
            .field("images", &self.images)
            .finish_non_exhaustive()
    }
}

impl ProductForm {
    /// Create a form for `product_id`, or for a new product. Nothing is
    /// shown until [`render`](Self::render); the empty image list is mounted
    /// into `image_surface` right away.
    pub fn new(
        store: Arc<dyn ProductStore>,
        product_id: Option<String>,
        surface: impl RenderSurface + 'static,
        image_surface: impl RenderSurface + 'static,
    ) -> Self {
        let defaults = ProductData::default();
        Self {
            product_id,
            store,
            images: SortableList::new(Vec::new(), image_surface),
            inner: Arc::new(RwLock::new(FormInner {
                values: FormField::ALL
                    .iter()
                    .map(|field| (*field, field.value_of(&defaults)))
                    .collect(),
                categories: Vec::new(),
                destroyed: false,
                surface: Box::new(surface),
            })),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, FormInner>> {
        self.inner
            .read()
            .map_err(|_| Error::InvalidState("form state poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, FormInner>> {
        self.inner
            .write()
            .map_err(|_| Error::InvalidState("form state poisoned"))
    }

    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    pub fn is_new(&self) -> bool {
        self.product_id.is_none()
    }

    /// Load categories and the product in parallel, then show the form.
    ///
    /// An unknown product id shows a not-found message and returns
    /// [`Error::NotFound`].
    pub async fn render(&self) -> Result<()> {
        let (categories, product) = match &self.product_id {
            Some(id) => {
                let (categories, products) =
                    futures::join!(self.store.categories(), self.store.product(id));
                let product = products?
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::NotFound(id.clone()));
                (categories?, product)
            }
            None => (self.store.categories().await?, Ok(ProductData::default())),
        };

        let product = match product {
            Ok(product) => product,
            Err(error) => {
                log::warn!("Product form cannot load product: {error}");
                let mut guard = self.write()?;
                guard.categories = categories;
                guard.surface.mount(not_found_element());
                return Err(error);
            }
        };

        {
            let mut guard = self.write()?;
            if guard.destroyed {
                return Err(Error::InvalidState("form destroyed"));
            }
            let defaults = ProductData::default();
            for field in FormField::ALL {
                guard.values.insert(field, initial_value(field, &product, &defaults));
            }
            guard.categories = categories;
            let root = form_element(&guard.values, &guard.options(), &guard.subcategory());
            guard.surface.mount(root);
        }

        for id in self.images.order() {
            self.images.remove_item(id)?;
        }
        for image in &product.images {
            self.images.add_item(image_element(image), None)?;
        }
        log::debug!(
            "Product form rendered with {} categories and {} images",
            self.read()?.categories.len(),
            product.images.len()
        );
        Ok(())
    }

    /// Raw value of `field` as an input would hold it.
    pub fn field(&self, field: FormField) -> Option<String> {
        self.read().ok()?.values.get(&field).cloned()
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) -> Result<()> {
        let mut guard = self.write()?;
        if guard.destroyed {
            return Err(Error::InvalidState("form destroyed"));
        }
        guard.values.insert(field, value.into());
        guard.paint();
        Ok(())
    }

    /// `(value, "Category > Subcategory")` pairs for the subcategory select.
    pub fn subcategory_options(&self) -> Vec<(String, String)> {
        self.read().map(|g| g.options()).unwrap_or_default()
    }

    /// The list holding the image items.
    pub fn image_list(&self) -> &SortableList {
        &self.images
    }

    /// Append an image to the list.
    pub fn add_image(&self, image: &ProductImage) -> Result<()> {
        self.images.add_item(image_element(image), None).map(|_| ())
    }

    /// Remove the image at `index` in list order.
    pub fn remove_image(&self, index: usize) -> Result<ProductImage> {
        let id = self
            .images
            .order()
            .get(index)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("image {index}")))?;
        let item = self.images.remove_item(id)?;
        Ok(image_of(item.content()))
    }

    /// Images in list order.
    pub fn images(&self) -> Vec<ProductImage> {
        self.images
            .items()
            .iter()
            .map(|item| image_of(item.content()))
            .collect()
    }

    /// Collect the payload: numeric fields parsed, images in list order and
    /// the product id when editing.
    pub fn form_data(&self) -> Result<ProductData> {
        let guard = self.read()?;
        let text = |field: FormField| guard.values.get(&field).cloned().unwrap_or_default();
        let number = |field: FormField| parse_int(&text(field));

        Ok(ProductData {
            id: self.product_id.clone(),
            title: text(FormField::Title),
            description: text(FormField::Description),
            quantity: number(FormField::Quantity),
            subcategory: guard.subcategory(),
            status: number(FormField::Status),
            price: number(FormField::Price),
            discount: number(FormField::Discount),
            images: self.images(),
        })
    }

    /// Send the payload to the store: an update when editing, a create
    /// otherwise.
    pub async fn save(&self) -> Result<FormEvent> {
        if self.read()?.destroyed {
            return Err(Error::InvalidState("form destroyed"));
        }
        let data = self.form_data()?;

        let result = if self.product_id.is_some() {
            self.store.update(&data).await.map(FormEvent::ProductUpdated)
        } else {
            self.store.create(&data).await.map(FormEvent::ProductSaved)
        };

        match result {
            Ok(event) => {
                log::info!("Product {:?} saved", event.product().id);
                Ok(event)
            }
            Err(error) => {
                log::error!("Failed to save product: {error}");
                Err(error.into())
            }
        }
    }

    /// Forward pointer events to the image list.
    pub fn handle_event(&self, event: &Event, layout: &LayoutResult) -> Result<()> {
        self.images.handle_event(event, layout)
    }

    /// Unmount the form and its image list.
    pub fn destroy(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.destroyed = true;
            guard.surface.unmount();
        }
        self.images.destroy();
        log::debug!("Product form destroyed");
    }
}

/// Loaded value of `field`; empty and zero values fall back to the default.
fn initial_value(field: FormField, product: &ProductData, defaults: &ProductData) -> String {
    let value = field.value_of(product);
    let unset = value.is_empty() || (field.is_numeric() && value == "0");
    if unset {
        field.value_of(defaults)
    } else {
        value
    }
}

fn subcategory_options(categories: &[Category]) -> Vec<(String, String)> {
    categories
        .iter()
        .flat_map(|category| {
            category.subcategories.iter().map(move |sub| {
                (sub.id.clone(), format!("{} > {}", category.title, sub.title))
            })
        })
        .collect()
}

/// An image list item: source label, grab handle, delete handle.
fn image_element(image: &ProductImage) -> Element {
    Element::div()
        .class("products-edit__imagelist-item")
        .data("url", image.url.clone())
        .data("source", image.source.clone())
        .child(Element::text(image.source.clone()))
        .child(Element::span().data(GRAB_HANDLE, "").height(1))
        .child(Element::span().data(DELETE_HANDLE, "").height(1))
}

fn image_of(content: &Element) -> ProductImage {
    let data = |key: &str| content.get_data(key).cloned().unwrap_or_default();
    ProductImage::new(data("url"), data("source"))
}

fn form_element(
    values: &BTreeMap<FormField, String>,
    options: &[(String, String)],
    selected: &str,
) -> Element {
    let fields = FormField::ALL
        .iter()
        .filter(|field| **field != FormField::Subcategory)
        .map(|field| {
            Element::div()
                .id(field.name())
                .class("form-control")
                .data("name", field.name())
                .child(Element::text(values.get(field).cloned().unwrap_or_default()))
        });

    let select = Element::div()
        .id(FormField::Subcategory.name())
        .class("form-control")
        .data("name", FormField::Subcategory.name())
        .children(options.iter().map(|(value, label)| {
            let option = Element::div()
                .data("value", value.clone())
                .child(Element::text(label.clone()));
            if value == selected {
                option.class("selected")
            } else {
                option
            }
        }));

    Element::div().class("product-form").child(
        Element::div()
            .region(FORM)
            .class("form-grid")
            .children(fields)
            .child(select)
            .child(Element::div().data("element", IMAGE_LIST)),
    )
}

fn not_found_element() -> Element {
    Element::div()
        .region(NOT_FOUND)
        .class("product-form")
        .child(Element::text("Page not found"))
}

/// Calls received by a [`MemoryProductStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Categories,
    Product(String),
    Create(ProductData),
    Update(ProductData),
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    categories: Vec<Category>,
    products: BTreeMap<String, ProductData>,
    calls: Vec<StoreCall>,
    fail_next: Option<FetchError>,
    next_id: usize,
}

/// A product store held in memory. Every call is recorded. Clones share
/// state.
#[derive(Debug, Clone, Default)]
pub struct MemoryProductStore {
    inner: Arc<RwLock<MemoryStoreInner>>,
}

impl MemoryProductStore {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryStoreInner {
                categories,
                ..Default::default()
            })),
        }
    }

    /// Store `product` under its id.
    pub fn with_product(self, product: ProductData) -> Self {
        if let (Ok(mut guard), Some(id)) = (self.inner.write(), product.id.clone()) {
            guard.products.insert(id, product);
        }
        self
    }

    /// Fail the next call with `error`.
    pub fn fail_next(&self, error: FetchError) {
        if let Ok(mut guard) = self.inner.write() {
            guard.fail_next = Some(error);
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner
            .read()
            .map(|g| g.calls.clone())
            .unwrap_or_default()
    }

    pub fn product_by_id(&self, id: &str) -> Option<ProductData> {
        self.inner.read().ok()?.products.get(id).cloned()
    }

    fn record(
        &self,
        call: StoreCall,
    ) -> std::result::Result<RwLockWriteGuard<'_, MemoryStoreInner>, FetchError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| FetchError::server(500, "store state poisoned"))?;
        guard.calls.push(call);
        match guard.fail_next.take() {
            Some(error) => Err(error),
            None => Ok(guard),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn categories(&self) -> std::result::Result<Vec<Category>, FetchError> {
        Ok(self.record(StoreCall::Categories)?.categories.clone())
    }

    async fn product(&self, id: &str) -> std::result::Result<Vec<ProductData>, FetchError> {
        let guard = self.record(StoreCall::Product(id.to_string()))?;
        Ok(guard.products.get(id).cloned().into_iter().collect())
    }

    async fn create(
        &self,
        product: &ProductData,
    ) -> std::result::Result<ProductData, FetchError> {
        let mut guard = self.record(StoreCall::Create(product.clone()))?;
        guard.next_id += 1;
        let mut created = product.clone();
        let id = format!("product-{}", guard.next_id);
        created.id = Some(id.clone());
        guard.products.insert(id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        product: &ProductData,
    ) -> std::result::Result<ProductData, FetchError> {
        let mut guard = self.record(StoreCall::Update(product.clone()))?;
        let Some(id) = product.id.clone() else {
            return Err(FetchError::server(400, "product id is required"));
        };
        if !guard.products.contains_key(&id) {
            return Err(FetchError::server(404, "Not Found"));
        }
        guard.products.insert(id, product.clone());
        Ok(product.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_takes_leading_digits() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int(" 12kg"), 12);
        assert_eq!(parse_int("-7"), -7);
        assert_eq!(parse_int("+3"), 3);
    }

    #[test]
    fn test_parse_int_without_digits_is_zero() {
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int("-"), 0);
        assert_eq!(parse_int("99999999999999999999"), 0);
    }

    #[test]
    fn test_initial_value_falls_back_on_zero_and_empty() {
        let defaults = ProductData::default();
        let product = ProductData {
            quantity: 0,
            discount: 5,
            ..ProductData::default()
        };

        assert_eq!(initial_value(FormField::Quantity, &product, &defaults), "1");
        assert_eq!(initial_value(FormField::Discount, &product, &defaults), "5");
        assert_eq!(initial_value(FormField::Title, &product, &defaults), "");
    }

    #[test]
    fn test_product_data_fills_missing_fields() {
        let data: ProductData = serde_json::from_str(r#"{"id":"p1","title":"Lamp"}"#).unwrap();

        assert_eq!(data.id.as_deref(), Some("p1"));
        assert_eq!(data.price, 100);
        assert!(data.images.is_empty());
    }
}
