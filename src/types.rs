//! Core types for the ER diagram model.
//!
//! This module defines the element and connection records, the patches used
//! to mutate them, and the tool palette. Records serialize to the flat JSON
//! shape used by saved diagrams (`type`, `fontSize`, `isKey`, ...); legacy
//! payloads are normalized on the way in.

use crate::constants::{
    ATTRIBUTE_SIZE, DEFAULT_FONT_SIZE, ENTITY_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE, RELATIONSHIP_SIZE,
};
use crate::geometry::{Point, Rect, point};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of an element. Unique for the lifetime of a diagram.
pub type ElementId = u64;

/// Identifier of a connection. Drawn from the same counter as element ids.
pub type ConnectionId = u64;

// ============================================================================
// Elements
// ============================================================================

/// The three shape families of an ER diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Entity,
    Attribute,
    Relationship,
}

impl ElementType {
    /// Base size of a freshly placed element of this type.
    pub fn default_size(self) -> (f32, f32) {
        match self {
            ElementType::Entity => ENTITY_SIZE,
            ElementType::Attribute => ATTRIBUTE_SIZE,
            ElementType::Relationship => RELATIONSHIP_SIZE,
        }
    }

    /// Smallest base width text fitting may shrink to.
    pub fn min_base_width(self) -> f32 {
        self.default_size().0
    }

    pub fn label(self) -> &'static str {
        match self {
            ElementType::Entity => "Entity",
            ElementType::Attribute => "Attribute",
            ElementType::Relationship => "Relationship",
        }
    }
}

/// Element shape with its type-specific data.
///
/// `is_key` only exists on attributes, so a key relationship cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Entity,
    Attribute { is_key: bool },
    Relationship,
}

impl ElementKind {
    pub fn element_type(self) -> ElementType {
        match self {
            ElementKind::Entity => ElementType::Entity,
            ElementKind::Attribute { .. } => ElementType::Attribute,
            ElementKind::Relationship => ElementType::Relationship,
        }
    }

    pub fn is_key(self) -> bool {
        matches!(self, ElementKind::Attribute { is_key: true })
    }

    fn from_parts(element_type: ElementType, is_key: Option<bool>) -> Self {
        match element_type {
            ElementType::Entity => ElementKind::Entity,
            ElementType::Attribute => ElementKind::Attribute {
                is_key: is_key.unwrap_or(false),
            },
            ElementType::Relationship => ElementKind::Relationship,
        }
    }
}

/// A placed diagram shape.
///
/// `x`/`y` is the top-left corner in unscaled diagram space and
/// `width`/`height` are base dimensions; the global element scale only
/// applies when rendering and hit testing (see [`Element::bounds`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawElement", into = "RawElement")]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub text: String,
    pub font_size: f32,
}

impl Element {
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn position(&self) -> Point {
        point(self.x, self.y)
    }

    /// Rendered bounds at the given element scale.
    pub fn bounds(&self, element_scale: f32) -> Rect {
        Rect::from_origin_size(
            self.position(),
            self.width * element_scale,
            self.height * element_scale,
        )
    }

    pub fn center(&self, element_scale: f32) -> Point {
        self.bounds(element_scale).center()
    }
}

/// Wire shape of an element: flat, camelCase, `isKey` only on attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawElement {
    id: ElementId,
    #[serde(rename = "type")]
    element_type: ElementType,
    x: f32,
    y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<f32>,
    #[serde(default)]
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_key: Option<bool>,
}

impl From<RawElement> for Element {
    fn from(raw: RawElement) -> Self {
        let (default_width, default_height) = raw.element_type.default_size();
        Self {
            id: raw.id,
            kind: ElementKind::from_parts(raw.element_type, raw.is_key),
            x: raw.x,
            y: raw.y,
            width: raw.width.unwrap_or(default_width),
            height: raw.height.unwrap_or(default_height),
            text: raw.text,
            font_size: raw.font_size.unwrap_or(DEFAULT_FONT_SIZE),
        }
    }
}

impl From<Element> for RawElement {
    fn from(element: Element) -> Self {
        let is_key = match element.kind {
            ElementKind::Attribute { is_key } => Some(is_key),
            _ => None,
        };
        Self {
            id: element.id,
            element_type: element.kind.element_type(),
            x: element.x,
            y: element.y,
            width: Some(element.width),
            height: Some(element.height),
            text: element.text,
            font_size: Some(element.font_size),
            is_key,
        }
    }
}

/// Creation parameters for [`crate::diagram::Diagram::add_element`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewElement {
    pub kind: ElementKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub text: String,
    pub font_size: f32,
}

impl NewElement {
    /// Default-sized element with its top-left corner at `(x, y)`.
    pub fn new(kind: ElementKind, x: f32, y: f32) -> Self {
        let element_type = kind.element_type();
        let (width, height) = element_type.default_size();
        Self {
            kind,
            x,
            y,
            width,
            height,
            text: element_type.label().to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// Default-sized element whose rendered bounds are centered on `center`.
    pub fn centered_at(kind: ElementKind, center: Point, element_scale: f32) -> Self {
        let (width, height) = kind.element_type().default_size();
        Self::new(
            kind,
            center.x - width * element_scale / 2.0,
            center.y - height * element_scale / 2.0,
        )
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = clamp_font_size(font_size);
        self
    }

    pub(crate) fn into_element(self, id: ElementId) -> Element {
        Element {
            id,
            kind: self.kind,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            text: self.text,
            font_size: self.font_size,
        }
    }
}

/// Partial update applied by `update_element` / `update_elements`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub text: Option<String>,
    pub font_size: Option<f32>,
    pub kind: Option<ElementKind>,
}

impl ElementPatch {
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn font_size(font_size: f32) -> Self {
        Self {
            font_size: Some(font_size),
            ..Default::default()
        }
    }

    pub fn kind(kind: ElementKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply(&self, element: &mut Element) {
        if let Some(x) = self.x {
            element.x = x;
        }
        if let Some(y) = self.y {
            element.y = y;
        }
        if let Some(width) = self.width {
            element.width = width;
        }
        if let Some(height) = self.height {
            element.height = height;
        }
        if let Some(text) = &self.text {
            element.text.clone_from(text);
        }
        if let Some(font_size) = self.font_size {
            element.font_size = clamp_font_size(font_size);
        }
        if let Some(kind) = self.kind {
            element.kind = kind;
        }
    }
}

pub(crate) fn clamp_font_size(font_size: f32) -> f32 {
    font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

// ============================================================================
// Connections
// ============================================================================

/// Cardinality label of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cardinality {
    #[default]
    #[serde(rename = "1")]
    One,
    #[serde(rename = "M")]
    M,
    #[serde(rename = "N")]
    N,
}

/// Participation constraint drawn at a connection's midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Participation {
    #[default]
    Mandatory,
    Optional,
}

/// A directed edge between two elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub from: ElementId,
    pub to: ElementId,
    #[serde(default, deserialize_with = "flat_or_paired")]
    pub cardinality: Cardinality,
    #[serde(default, deserialize_with = "flat_or_paired")]
    pub participation: Participation,
}

/// Legacy files store per-end `{from, to}` pairs; only `from` was ever read.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlatOrPaired<T> {
    Flat(T),
    Paired { from: Option<T> },
}

fn flat_or_paired<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(
        match Option::<FlatOrPaired<T>>::deserialize(deserializer)? {
            Some(FlatOrPaired::Flat(value)) => value,
            Some(FlatOrPaired::Paired { from }) => from.unwrap_or_default(),
            None => T::default(),
        },
    )
}

/// Cardinality and participation chosen for a new connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionConfig {
    pub cardinality: Cardinality,
    pub participation: Participation,
}

/// Creation parameters for [`crate::diagram::Diagram::add_connection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewConnection {
    pub from: ElementId,
    pub to: ElementId,
    pub cardinality: Cardinality,
    pub participation: Participation,
}

impl NewConnection {
    pub fn new(from: ElementId, to: ElementId) -> Self {
        Self::with_config(from, to, ConnectionConfig::default())
    }

    pub fn with_config(from: ElementId, to: ElementId, config: ConnectionConfig) -> Self {
        Self {
            from,
            to,
            cardinality: config.cardinality,
            participation: config.participation,
        }
    }

    pub(crate) fn into_connection(self, id: ConnectionId) -> Connection {
        Connection {
            id,
            from: self.from,
            to: self.to,
            cardinality: self.cardinality,
            participation: self.participation,
        }
    }
}

/// Partial update applied by `update_connection`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionPatch {
    pub cardinality: Option<Cardinality>,
    pub participation: Option<Participation>,
}

impl ConnectionPatch {
    pub(crate) fn apply(&self, connection: &mut Connection) {
        if let Some(cardinality) = self.cardinality {
            connection.cardinality = cardinality;
        }
        if let Some(participation) = self.participation {
            connection.participation = participation;
        }
    }
}

// ============================================================================
// Tools
// ============================================================================

/// Tool palette. Exactly one tool is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Select,
    Entity,
    Attribute,
    KeyAttribute,
    Relationship,
    /// Click a source element, then a target element.
    Connect,
}

impl Tool {
    /// Element kind placed by this tool, if it is a shape tool.
    pub fn element_kind(self) -> Option<ElementKind> {
        match self {
            Tool::Entity => Some(ElementKind::Entity),
            Tool::Attribute => Some(ElementKind::Attribute { is_key: false }),
            Tool::KeyAttribute => Some(ElementKind::Attribute { is_key: true }),
            Tool::Relationship => Some(ElementKind::Relationship),
            Tool::Select | Tool::Connect => None,
        }
    }
}
