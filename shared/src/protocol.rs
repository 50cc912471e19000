use crate::{BuildCartLine, BuildCartStats, ComponentSlot, ProductId, ProductRef};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The type carried in the envelope's `metadata` field.
    type Response: DeserializeOwned;
    /// The URL path, relative to the API base URL.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Query string pairs appended to `PATH`.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// 服务端统一的响应包装
///
/// 服务端历史版本里数据字段叫 `data`，现在叫 `metadata`，两者都接受。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, alias = "data", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<T>,
}

// =========================================================
// Request Definitions
// =========================================================

/// Fetch the authoritative build cart
#[derive(Debug, Serialize, Deserialize)]
pub struct GetBuildCartRequest;

impl ApiRequest for GetBuildCartRequest {
    type Response = Vec<BuildCartLine>;
    const PATH: &'static str = "/api/get-cart-build-pc";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Select a product for its slot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToBuildCartRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl ApiRequest for AddToBuildCartRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/api/build-pc-cart";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Set the quantity of a product already in the build
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl ApiRequest for UpdateQuantityRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/api/update-quantity-cart-build-pc";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteComponentRequest {
    pub product_id: ProductId,
}

impl ApiRequest for DeleteComponentRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/api/delete-cart-build-pc";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteAllRequest;

impl ApiRequest for DeleteAllRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/api/delete-all-cart-build-pc";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Move the whole build into the main cart
#[derive(Debug, Serialize, Deserialize)]
pub struct CommitToCartRequest;

impl ApiRequest for CommitToCartRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/api/add-to-cart-build-pc";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BuildCartStatsRequest;

impl ApiRequest for BuildCartStatsRequest {
    type Response = BuildCartStats;
    const PATH: &'static str = "/api/build-pc-cart/stats";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Candidate products for one slot (the selection modal)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsByComponentRequest {
    pub component_type: ComponentSlot,
}

impl ApiRequest for ProductsByComponentRequest {
    type Response = Vec<ProductRef>;
    const PATH: &'static str = "/api/get-product-by-component-type";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("componentType", self.component_type.wire_name().to_string())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_accepts_data_alias() {
        let env: ApiEnvelope<BuildCartStats> =
            serde_json::from_value(json!({ "data": { "totalPrice": 12, "itemCount": 2 } }))
                .unwrap();
        assert_eq!(env.metadata.unwrap().item_count, 2);
        assert!(env.message.is_none());
    }

    #[test]
    fn mutation_bodies_use_camel_case() {
        let body = serde_json::to_value(UpdateQuantityRequest {
            product_id: ProductId::nil(),
            quantity: 3,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "productId": "00000000-0000-0000-0000-000000000000", "quantity": 3 })
        );
        assert!(serde_json::to_value(DeleteAllRequest).unwrap().is_null());
    }

    #[test]
    fn routes_follow_build_pc_cart_controller() {
        assert_eq!(GetBuildCartRequest::PATH, "/api/get-cart-build-pc");
        assert_eq!(AddToBuildCartRequest::PATH, "/api/build-pc-cart");
        assert_eq!(UpdateQuantityRequest::PATH, "/api/update-quantity-cart-build-pc");
        assert_eq!(DeleteComponentRequest::PATH, "/api/delete-cart-build-pc");
        assert_eq!(DeleteAllRequest::PATH, "/api/delete-all-cart-build-pc");
        assert_eq!(CommitToCartRequest::PATH, "/api/add-to-cart-build-pc");
        assert_eq!(BuildCartStatsRequest::PATH, "/api/build-pc-cart/stats");
        assert_eq!(DeleteAllRequest::METHOD, HttpMethod::Post);
        assert_eq!(GetBuildCartRequest::METHOD, HttpMethod::Get);
    }
}
