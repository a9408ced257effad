use crate::annotation::domain::graphics_item::GraphicsItem;
use crate::shared::face_region::FaceRegion;

/// Turns upstream annotations into face boxes the predictor can use.
///
/// Text items are skipped. Every other item contributes its bounding box,
/// but only when the whole box lies inside the image (see
/// [`FaceRegion::is_inside`]). Order of the accepted items is preserved.
pub fn collect_face_regions(
    items: &[GraphicsItem],
    image_width: u32,
    image_height: u32,
) -> Vec<FaceRegion> {
    let mut faces = Vec::with_capacity(items.len());
    for item in items {
        if item.is_text() {
            continue;
        }
        let region = item.bounding_rect().to_region();
        if region.is_inside(image_width, image_height) {
            faces.push(region);
        } else {
            log::debug!("Skipping face box {region:?} outside {image_width}x{image_height} image");
        }
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::point::PointF;

    fn text(x: f32, y: f32) -> GraphicsItem {
        GraphicsItem::Text {
            x,
            y,
            text: "label".into(),
        }
    }

    #[test]
    fn test_empty_items() {
        assert!(collect_face_regions(&[], 100, 100).is_empty());
    }

    #[test]
    fn test_keeps_box_inside_image() {
        let items = vec![GraphicsItem::rectangle(10.0, 10.0, 50.0, 50.0)];
        let faces = collect_face_regions(&items, 100, 100);
        assert_eq!(faces, vec![FaceRegion::new(10, 10, 50, 50)]);
    }

    #[test]
    fn test_excludes_out_of_bounds_boxes() {
        let items = vec![
            GraphicsItem::rectangle(-5.0, 10.0, 50.0, 50.0),
            GraphicsItem::rectangle(60.0, 10.0, 50.0, 50.0),
            GraphicsItem::rectangle(10.0, 60.0, 50.0, 50.0),
            GraphicsItem::rectangle(20.0, 20.0, 30.0, 30.0),
        ];
        let faces = collect_face_regions(&items, 100, 100);
        assert_eq!(faces, vec![FaceRegion::new(20, 20, 30, 30)]);
    }

    #[test]
    fn test_box_touching_last_column_is_excluded() {
        // x + w == width is not strictly inside.
        let items = vec![GraphicsItem::rectangle(50.0, 10.0, 50.0, 20.0)];
        assert!(collect_face_regions(&items, 100, 100).is_empty());
    }

    #[test]
    fn test_skips_text_items_even_when_inside() {
        let items = vec![
            text(10.0, 10.0),
            GraphicsItem::rectangle(10.0, 10.0, 20.0, 20.0),
        ];
        let faces = collect_face_regions(&items, 100, 100);
        assert_eq!(faces.len(), 1);
    }

    #[test]
    fn test_uses_bounding_box_of_non_rectangular_items() {
        let items = vec![
            GraphicsItem::Ellipse {
                x: 5.0,
                y: 5.0,
                width: 40.0,
                height: 30.0,
            },
            GraphicsItem::Polygon {
                points: vec![PointF::new(60.0, 60.0), PointF::new(80.0, 90.0)],
            },
        ];
        let faces = collect_face_regions(&items, 100, 100);
        assert_eq!(
            faces,
            vec![FaceRegion::new(5, 5, 40, 30), FaceRegion::new(60, 60, 20, 30)]
        );
    }

    #[test]
    fn test_preserves_input_order() {
        let items = vec![
            GraphicsItem::rectangle(50.0, 50.0, 10.0, 10.0),
            GraphicsItem::rectangle(5.0, 5.0, 10.0, 10.0),
        ];
        let faces = collect_face_regions(&items, 100, 100);
        assert_eq!(faces[0].x, 50);
        assert_eq!(faces[1].x, 5);
    }
}
