//! Raw `.unl` document structure.
//!
//! These types mirror the XML written by EVE-NG and are deserialized with
//! quick-xml's serde support. Attribute values are kept as strings; turning
//! them into typed records (and reporting bad values with the element they
//! belong to) happens in [`crate::convert`].
//!
//! ```text
//! <lab name id>
//!   <topology>
//!     <nodes><node id name type ...><interface id name type .../></node></nodes>
//!     <networks><network id .../></networks>
//!   </topology>
//!   <objects>
//!     <textobjects><textobject id><data>base64 html</data></textobject></textobjects>
//!     <configs><config id>base64 config</config></configs>
//!   </objects>
//! </lab>
//! ```

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename = "lab")]
pub(crate) struct Lab {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(default)]
    pub topology: Topology,
    #[serde(default)]
    pub objects: Objects,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Topology {
    #[serde(default)]
    pub nodes: Nodes,
    #[serde(default)]
    pub networks: Networks,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Nodes {
    #[serde(rename = "node", default)]
    pub items: Vec<Node>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Node {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@type")]
    pub node_type: String,
    #[serde(rename = "@template", default)]
    pub template: String,
    #[serde(rename = "@image", default)]
    pub image: String,
    #[serde(rename = "@icon", default)]
    pub icon: String,
    #[serde(rename = "@left", default)]
    pub left: String,
    #[serde(rename = "@top", default)]
    pub top: String,
    #[serde(rename = "@ethernet")]
    pub ethernet: Option<String>,
    #[serde(rename = "@serial")]
    pub serial: Option<String>,
    #[serde(rename = "@nvram")]
    pub nvram: Option<String>,
    #[serde(rename = "@ram")]
    pub ram: Option<String>,
    #[serde(rename = "@cpu")]
    pub cpu: Option<String>,
    #[serde(rename = "@console")]
    pub console: Option<String>,
    #[serde(rename = "interface", default)]
    pub interfaces: Vec<Interface>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Interface {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@type")]
    pub interface_type: String,
    #[serde(rename = "@network_id")]
    pub network_id: Option<String>,
    #[serde(rename = "@remote_id")]
    pub remote_id: Option<String>,
    #[serde(rename = "@remote_if")]
    pub remote_if: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Networks {
    #[serde(rename = "network", default)]
    pub items: Vec<Network>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Network {
    #[serde(rename = "@id")]
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Objects {
    #[serde(default)]
    pub textobjects: TextObjects,
    #[serde(default)]
    pub configs: Configs,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TextObjects {
    #[serde(rename = "textobject", default)]
    pub items: Vec<TextObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextObject {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Configs {
    #[serde(rename = "config", default)]
    pub items: Vec<Config>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Config {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "$text", default)]
    pub data: String,
}
