//! Object model consumed by the layout and constraint code.
//!
//! The rendering side owns its objects; everything here only needs the
//! [`CanvasObject`] contract: transformed corners, a bounding box, and a
//! way to patch the transform. Objects cache their transformed geometry,
//! so [`CanvasObject::recompute_coords`] must run after every mutation
//! before corners or bounds are queried again. [`CanvasObject::update`]
//! does both.

use crate::geometry::deg_to_rad;
use crate::types::{Corners, Point, Rect};

/// Stable object identifier, never reused within a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u64);

/// Which point of the object `left`/`top` refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Origin {
    /// `left`/`top` is the object's center
    #[default]
    Center,
    /// `left`/`top` is the transformed top-left corner
    TopLeft,
}

/// Snapshot of an object's transform
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub left: f64,
    pub top: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Rotation in degrees, [0, 360)
    pub angle: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    pub origin: Origin,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            origin: Origin::Center,
        }
    }
}

/// Partial transform update; `None` fields are left untouched
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformPatch {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    pub angle: Option<f64>,
    pub skew_x: Option<f64>,
    pub skew_y: Option<f64>,
    pub origin: Option<Origin>,
}

impl TransformPatch {
    pub fn position(left: f64, top: f64) -> Self {
        Self {
            left: Some(left),
            top: Some(top),
            ..Default::default()
        }
    }

    pub fn scale(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x: Some(scale_x),
            scale_y: Some(scale_y),
            ..Default::default()
        }
    }

    pub fn angle(angle: f64) -> Self {
        Self {
            angle: Some(angle),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, left: f64, top: f64) -> Self {
        self.left = Some(left);
        self.top = Some(top);
        self
    }

    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = Some(scale_x);
        self.scale_y = Some(scale_y);
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn with_skew(mut self, skew_x: f64, skew_y: f64) -> Self {
        self.skew_x = Some(skew_x);
        self.skew_y = Some(skew_y);
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// Contract between the core and the surrounding object system
pub trait CanvasObject {
    fn id(&self) -> ObjectId;

    /// Unscaled width and height in pixels
    fn intrinsic_size(&self) -> (f64, f64);

    fn transform(&self) -> Transform;

    /// Patch the transform. Cached coordinates are not refreshed.
    fn set_transform(&mut self, patch: TransformPatch);

    /// Refresh cached corner coordinates from the current transform
    fn recompute_coords(&mut self);

    /// Transformed corners as of the last `recompute_coords`
    fn corner_points(&self) -> Corners;

    /// Axis-aligned bounds of the transformed object
    fn bounding_box(&self) -> Rect {
        self.corner_points().bounding_box()
    }

    /// Patch the transform and refresh coordinates
    fn update(&mut self, patch: TransformPatch) {
        self.set_transform(patch);
        self.recompute_coords();
    }
}

/// An uploaded image placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct ImageObject {
    id: ObjectId,
    width: f64,
    height: f64,
    transform: Transform,
    coords: Corners,
}

impl ImageObject {
    /// Create an image centered on the origin at scale 1
    pub fn new(id: ObjectId, width: f64, height: f64) -> Self {
        Self::with_transform(id, width, height, Transform::default())
    }

    pub fn with_transform(id: ObjectId, width: f64, height: f64, transform: Transform) -> Self {
        let mut object = Self {
            id,
            width,
            height,
            transform,
            coords: Corners::default(),
        };
        object.recompute_coords();
        object
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Center of the object computed from the live transform
    pub fn center(&self) -> Point {
        let t = &self.transform;
        match t.origin {
            Origin::Center => Point::new(t.left, t.top),
            Origin::TopLeft => {
                let offset = self.linear(self.width / 2.0, self.height / 2.0);
                Point::new(t.left + offset.x, t.top + offset.y)
            }
        }
    }

    /// Apply skew, scale and rotation to a point relative to the center
    fn linear(&self, x: f64, y: f64) -> Point {
        let t = &self.transform;
        let y = y + deg_to_rad(t.skew_y).tan() * x;
        let x = x + deg_to_rad(t.skew_x).tan() * y;
        let x = x * t.scale_x;
        let y = y * t.scale_y;
        let (sin, cos) = deg_to_rad(t.angle).sin_cos();
        Point::new(x * cos - y * sin, x * sin + y * cos)
    }

    fn position_for_center(&self, center: Point) -> (f64, f64) {
        match self.transform.origin {
            Origin::Center => (center.x, center.y),
            Origin::TopLeft => {
                let offset = self.linear(self.width / 2.0, self.height / 2.0);
                (center.x - offset.x, center.y - offset.y)
            }
        }
    }
}

impl CanvasObject for ImageObject {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn intrinsic_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_transform(&mut self, patch: TransformPatch) {
        // Switching origin without a new position keeps the object in place
        let keep_center = match patch.origin {
            Some(origin) if origin != self.transform.origin => {
                (patch.left.is_none() && patch.top.is_none()).then(|| self.center())
            }
            _ => None,
        };

        let t = &mut self.transform;
        if let Some(v) = patch.scale_x {
            t.scale_x = v;
        }
        if let Some(v) = patch.scale_y {
            t.scale_y = v;
        }
        if let Some(v) = patch.angle {
            t.angle = crate::geometry::normalize_angle(v);
        }
        if let Some(v) = patch.skew_x {
            t.skew_x = v;
        }
        if let Some(v) = patch.skew_y {
            t.skew_y = v;
        }
        if let Some(origin) = patch.origin {
            t.origin = origin;
        }
        if let Some(v) = patch.left {
            t.left = v;
        }
        if let Some(v) = patch.top {
            t.top = v;
        }

        if let Some(center) = keep_center {
            let (left, top) = self.position_for_center(center);
            self.transform.left = left;
            self.transform.top = top;
        }
    }

    fn recompute_coords(&mut self) {
        let center = self.center();
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        let corner = |x: f64, y: f64| {
            let p = self.linear(x, y);
            Point::new(center.x + p.x, center.y + p.y)
        };
        let coords = Corners {
            tl: corner(-hw, -hh),
            tr: corner(hw, -hh),
            br: corner(hw, hh),
            bl: corner(-hw, hh),
        };
        self.coords = coords;
    }

    fn corner_points(&self) -> Corners {
        self.coords
    }
}

/// The object container of one page
#[derive(Debug, Clone)]
pub struct Canvas<O> {
    objects: Vec<O>,
    next_id: u64,
}

impl<O: CanvasObject> Default for Canvas<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: CanvasObject> Canvas<O> {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 0,
        }
    }

    /// Hand out an id that no object on this canvas has used
    pub fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add(&mut self, object: O) {
        self.next_id = self.next_id.max(object.id().0 + 1);
        self.objects.push(object);
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<O> {
        let index = self.objects.iter().position(|o| o.id() == id)?;
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: ObjectId) -> Option<&O> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut O> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn objects(&self) -> &[O] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [O] {
        &mut self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Canvas<ImageObject> {
    /// Add a decoded image with a fresh id
    pub fn add_image(&mut self, width: f64, height: f64) -> ObjectId {
        let id = self.allocate_id();
        self.objects.push(ImageObject::new(id, width, height));
        id
    }
}
