/// Role of a point in the retrieval scatter plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    Query,
    Doc,
    Other,
}

impl PointKind {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "query" => PointKind::Query,
            "doc" => PointKind::Doc,
            _ => PointKind::Other,
        }
    }
}

/// One projected embedding: the query or a retrieved chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct VizPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub kind: PointKind,
    pub text: String,
    pub metadata: Vec<(String, String)>,
}

/// Visualization payload returned alongside a chat answer.
///
/// The query point is absent when the backend retrieved nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Visualization {
    pub query_point: Option<VizPoint>,
    pub points: Vec<VizPoint>,
}

impl Visualization {
    pub fn is_empty(&self) -> bool {
        self.query_point.is_none() && self.points.is_empty()
    }
}
