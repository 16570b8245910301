//! Rectangle reduction: collapse runs of sub-pixel rectangles before drawing.

use hchart_protocol::Rect;

use crate::model::IntervalNode;

/// Compacts an index-aligned `(rectangles, nodes)` list in place.
///
/// Implementations must leave both vectors the same length and keep every
/// surviving rectangle paired with the node hit-testing should resolve to.
pub trait RectReducer<T> {
    fn reduce<'n>(&self, rectangles: &mut Vec<Rect>, nodes: &mut Vec<&'n IntervalNode<T>>);
}

/// Greedy single-pass pixel merge.
///
/// A rectangle spanning more than one pixel column is kept as is. A
/// rectangle confined to one column absorbs the following rectangles of
/// the same depth whose right edge falls in that same column; the first
/// node of the run is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelMergeReducer;

impl<T> RectReducer<T> for PixelMergeReducer {
    fn reduce<'n>(&self, rectangles: &mut Vec<Rect>, nodes: &mut Vec<&'n IntervalNode<T>>) {
        assert_eq!(
            rectangles.len(),
            nodes.len(),
            "rectangles and nodes must be index-aligned"
        );

        let len = rectangles.len();
        let mut read = 0;
        let mut write = 0;
        while read < len {
            let mut rect = rectangles[read];
            let node = nodes[read];
            read += 1;

            let column = rect.max_x().floor();
            if rect.min_x().floor() >= column {
                let mut max_x = rect.max_x();
                while read < len
                    && nodes[read].depth() == node.depth()
                    && rectangles[read].max_x().floor() == column
                {
                    max_x = max_x.max(rectangles[read].max_x());
                    read += 1;
                }
                rect.w = max_x - rect.x;
            }

            rectangles[write] = rect;
            nodes[write] = node;
            write += 1;
        }
        rectangles.truncate(write);
        nodes.truncate(write);

        debug_assert_eq!(rectangles.len(), nodes.len());
    }
}
