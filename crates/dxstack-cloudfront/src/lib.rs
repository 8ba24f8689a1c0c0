//! CDN distribution and Lambda@Edge constructs.

mod distribution;
mod edge;
mod options;

pub use distribution::{
    Distribution, DistributionProps, DomainAliases, EdgeAssociation, MANAGED_CACHING_OPTIMIZED,
};
pub use edge::{BasicAuthEdge, BasicAuthEdgeProps, UrlRewriteEdge};
pub use options::{
    AllowedMethods, CachedMethods, EdgeEventType, PriceClass, SecurityPolicy, SslMethod,
    ViewerProtocolPolicy,
};
