//! DNS-validated certificate constructs.

mod certificate;
mod multi_domain;

pub use certificate::{Certificate, CertificateProps};
pub use multi_domain::{MultiDomainCertificate, MultiDomainCertificateProps};
