//! Prints the CRD manifests managed by this controller as YAML.
//!
//! Usage: `cargo run -p crds --bin crdgen > config/crd/bases/cache_subnet_group.yaml`

use crds::CacheSubnetGroup;
use kube::CustomResourceExt;

fn main() -> anyhow::Result<()> {
    let crd = CacheSubnetGroup::crd();
    print!("{}", serde_yaml::to_string(&crd)?);
    Ok(())
}
