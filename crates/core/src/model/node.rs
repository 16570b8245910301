use crate::error::TreeError;

/// Default bound on tree depth accepted by [`IntervalNode::validate`].
pub const DEFAULT_MAX_DEPTH: u32 = 1024;

/// A node of a call-stack tree: a half-open `[start, end)` interval at a
/// given depth, owning its children in left-to-right time order.
///
/// Trees are populated once by a loader and then only read. Children are
/// expected to lie within their parent's interval; the chart prunes whole
/// subtrees on that assumption, and [`validate`](Self::validate) checks it.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalNode<T> {
    start: i64,
    end: i64,
    depth: u32,
    data: T,
    children: Vec<IntervalNode<T>>,
}

impl<T> IntervalNode<T> {
    /// A childless node at depth 0.
    pub fn new(start: i64, end: i64, data: T) -> Self {
        Self {
            start,
            end,
            depth: 0,
            data,
            children: Vec::new(),
        }
    }

    /// Append `child`, re-assigning depths in its subtree.
    pub fn with_child(mut self, child: IntervalNode<T>) -> Self {
        self.push_child(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = IntervalNode<T>>) -> Self {
        for child in children {
            self.push_child(child);
        }
        self
    }

    /// Construction-time population for loaders that build bottom-up.
    pub fn push_child(&mut self, mut child: IntervalNode<T>) {
        child.assign_depth(self.depth + 1);
        self.children.push(child);
    }

    fn assign_depth(&mut self, depth: u32) {
        let mut stack: Vec<(&mut IntervalNode<T>, u32)> = vec![(self, depth)];
        while let Some((node, d)) = stack.pop() {
            node.depth = d;
            for child in &mut node.children {
                stack.push((child, d + 1));
            }
        }
    }

    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    #[inline]
    pub fn children(&self) -> &[IntervalNode<T>] {
        &self.children
    }

    pub fn child_at(&self, index: usize) -> Option<&IntervalNode<T>> {
        self.children.get(index)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether `[start, end]` touches the closed range `[min, max]`.
    #[inline]
    pub fn intersects(&self, min: f64, max: f64) -> bool {
        self.start as f64 <= max && self.end as f64 >= min
    }

    /// Deepest depth anywhere in this subtree.
    pub fn max_depth(&self) -> u32 {
        let mut deepest = self.depth;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            deepest = deepest.max(node.depth);
            stack.extend(node.children.iter());
        }
        deepest
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Whether `other` is this node or one of its descendants (by identity).
    pub fn contains_node(&self, other: &IntervalNode<T>) -> bool {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if std::ptr::eq(node, other) {
                return true;
            }
            // Descendants of an interval that cannot hold `other` are skipped.
            if node.start <= other.start && node.end >= other.end {
                stack.extend(node.children.iter());
            }
        }
        false
    }

    /// Check the invariants traversal relies on: well-formed intervals,
    /// children contained in and ordered within their parent, consistent
    /// depths, and a depth bound for untrusted input.
    pub fn validate(&self, max_depth: u32) -> Result<(), TreeError> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.end < node.start {
                return Err(TreeError::InvertedInterval {
                    start: node.start,
                    end: node.end,
                });
            }
            if node.depth > max_depth {
                return Err(TreeError::TooDeep {
                    depth: node.depth,
                    limit: max_depth,
                });
            }
            let mut previous = node.start;
            for child in &node.children {
                if child.depth != node.depth + 1 {
                    return Err(TreeError::DepthMismatch {
                        parent: node.depth,
                        found: child.depth,
                    });
                }
                if child.start < node.start || child.end > node.end {
                    return Err(TreeError::EscapesParent {
                        start: child.start,
                        end: child.end,
                        parent_start: node.start,
                        parent_end: node.end,
                    });
                }
                if child.start < previous {
                    return Err(TreeError::OutOfOrder {
                        start: child.start,
                        previous,
                    });
                }
                previous = child.start;
                stack.push(child);
            }
        }
        Ok(())
    }
}
