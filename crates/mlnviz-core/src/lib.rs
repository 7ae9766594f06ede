pub mod cache;
pub mod dataset;
pub mod dataset_type;
pub mod format;
pub mod graph;
pub mod mapping;
pub mod stats;

pub use mlnviz_error::{Error, ErrorKind, Result};

pub use cache::{ArtifactPath, CacheDecision, CacheKey, RegenerationCache, VISUALIZATION_DIR};
pub use dataset::{
    CommunityId, DatasetContent, InputDataset, InputFormat, VertexId, WeightedEdge,
};
pub use dataset_type::{DatasetType, create_url, form_encode};
pub use format::{parse_file, parse_str, write_dataset};
pub use graph::NetworkView;
pub use mapping::{GeoPoint, LabelMapping, MappingValue};
pub use stats::{CommunityStats, community_stats};
