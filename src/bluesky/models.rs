use serde::{Deserialize, Serialize};

use crate::facet::LinkFacet;

pub const POST_COLLECTION: &str = "app.bsky.feed.post";

#[derive(Serialize)]
pub struct CreateSessionRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_jwt: String,
    pub did: String,
    pub handle: String,
}

#[derive(Serialize)]
pub struct CreateRecordRequest<'a> {
    pub repo: &'a str,
    pub collection: &'a str,
    pub record: PostRecord<'a>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord<'a> {
    #[serde(rename = "$type")]
    pub record_type: &'a str,
    pub text: &'a str,
    pub created_at: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<Facet>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    pub index: ByteSlice,
    pub features: Vec<FacetFeature>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ByteSlice {
    pub byte_start: usize,
    pub byte_end: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "$type")]
pub enum FacetFeature {
    #[serde(rename = "app.bsky.richtext.facet#link")]
    Link { uri: String },
}

impl From<&LinkFacet> for Facet {
    fn from(facet: &LinkFacet) -> Self {
        Facet {
            index: ByteSlice {
                byte_start: facet.byte_start,
                byte_end: facet.byte_end,
            },
            features: vec![FacetFeature::Link {
                uri: facet.target_url.clone(),
            }],
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublishedPost {
    pub uri: String,
    pub cid: String,
}

/// Body of a failed XRPC call.
#[derive(Deserialize, Debug, Default)]
pub struct XrpcError {
    pub error: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn link_facet_serializes_in_richtext_shape() {
        let facet = Facet::from(&LinkFacet {
            byte_start: 4,
            byte_end: 17,
            target_url: "https://x.io/a".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&facet).unwrap(),
            json!({
                "index": { "byteStart": 4, "byteEnd": 17 },
                "features": [
                    { "$type": "app.bsky.richtext.facet#link", "uri": "https://x.io/a" }
                ]
            })
        );
    }

    #[test]
    fn post_record_uses_lexicon_field_names() {
        let record = PostRecord {
            record_type: POST_COLLECTION,
            text: "hello",
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            facets: Vec::new(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["$type"], "app.bsky.feed.post");
        assert_eq!(value["createdAt"], "2024-01-01T00:00:00.000Z");
        assert!(value.get("facets").is_none());
    }

    #[test]
    fn session_reads_camel_case() {
        let session: Session = serde_json::from_value(json!({
            "accessJwt": "jwt",
            "refreshJwt": "r",
            "did": "did:plc:abc",
            "handle": "me.bsky.social"
        }))
        .unwrap();
        assert_eq!(session.access_jwt, "jwt");
        assert_eq!(session.did, "did:plc:abc");
    }
}
