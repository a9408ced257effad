use serde::{Deserialize, Serialize};

use crate::shared::point::PointF;

/// A vector shape emitted for display on top of the image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "points", rename_all = "lowercase")]
pub enum GraphicsShape {
    Point(PointF),
    /// Open chain of segments.
    Polyline(Vec<PointF>),
    /// Closed outline.
    Polygon(Vec<PointF>),
}

/// Named collection of shapes bound to one image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphicsLayer {
    pub name: String,
    pub image_index: usize,
    pub shapes: Vec<GraphicsShape>,
}

impl GraphicsLayer {
    pub fn new(name: impl Into<String>, image_index: usize) -> Self {
        Self {
            name: name.into(),
            image_index,
            shapes: Vec::new(),
        }
    }

    pub fn add_point(&mut self, point: PointF) {
        self.shapes.push(GraphicsShape::Point(point));
    }

    pub fn add_polyline(&mut self, points: Vec<PointF>) {
        self.shapes.push(GraphicsShape::Polyline(points));
    }

    pub fn add_polygon(&mut self, points: Vec<PointF>) {
        self.shapes.push(GraphicsShape::Polygon(points));
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer_is_empty() {
        let layer = GraphicsLayer::new("infer_facemark_lbf", 0);
        assert!(layer.is_empty());
        assert_eq!(layer.name, "infer_facemark_lbf");
        assert_eq!(layer.image_index, 0);
    }

    #[test]
    fn test_add_shapes_in_order() {
        let mut layer = GraphicsLayer::new("l", 0);
        layer.add_point(PointF::new(1.0, 1.0));
        layer.add_polyline(vec![PointF::new(0.0, 0.0), PointF::new(1.0, 1.0)]);
        layer.add_polygon(vec![PointF::new(0.0, 0.0); 3]);
        assert_eq!(layer.len(), 3);
        assert!(matches!(layer.shapes[0], GraphicsShape::Point(_)));
        assert!(matches!(layer.shapes[1], GraphicsShape::Polyline(_)));
        assert!(matches!(layer.shapes[2], GraphicsShape::Polygon(_)));
    }

    #[test]
    fn test_shape_json_is_tagged() {
        let json = serde_json::to_string(&GraphicsShape::Point(PointF::new(1.0, 2.0))).unwrap();
        assert_eq!(json, r#"{"type":"point","points":{"x":1.0,"y":2.0}}"#);
    }
}
