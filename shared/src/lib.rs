use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

pub type ProductId = Uuid;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 装机配置中的组件槽位
///
/// 固定 13 种，顺序即配置页的展示顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentSlot {
    Cpu,
    Mainboard,
    Ram,
    Hdd,
    Ssd,
    Vga,
    Power,
    Cooler,
    Case,
    Monitor,
    Keyboard,
    Mouse,
    Headset,
}

impl ComponentSlot {
    pub const ALL: [ComponentSlot; 13] = [
        ComponentSlot::Cpu,
        ComponentSlot::Mainboard,
        ComponentSlot::Ram,
        ComponentSlot::Hdd,
        ComponentSlot::Ssd,
        ComponentSlot::Vga,
        ComponentSlot::Power,
        ComponentSlot::Cooler,
        ComponentSlot::Case,
        ComponentSlot::Monitor,
        ComponentSlot::Keyboard,
        ComponentSlot::Mouse,
        ComponentSlot::Headset,
    ];

    /// 线上传输使用的名称（小写）
    pub fn wire_name(&self) -> &'static str {
        match self {
            ComponentSlot::Cpu => "cpu",
            ComponentSlot::Mainboard => "mainboard",
            ComponentSlot::Ram => "ram",
            ComponentSlot::Hdd => "hdd",
            ComponentSlot::Ssd => "ssd",
            ComponentSlot::Vga => "vga",
            ComponentSlot::Power => "power",
            ComponentSlot::Cooler => "cooler",
            ComponentSlot::Case => "case",
            ComponentSlot::Monitor => "monitor",
            ComponentSlot::Keyboard => "keyboard",
            ComponentSlot::Mouse => "mouse",
            ComponentSlot::Headset => "headset",
        }
    }

    /// 配置页上显示的名称
    pub fn label(&self) -> &'static str {
        match self {
            ComponentSlot::Cpu => "CPU",
            ComponentSlot::Mainboard => "Mainboard",
            ComponentSlot::Ram => "RAM",
            ComponentSlot::Hdd => "HDD",
            ComponentSlot::Ssd => "SSD",
            ComponentSlot::Vga => "VGA",
            ComponentSlot::Power => "Power Supply",
            ComponentSlot::Cooler => "Cooler",
            ComponentSlot::Case => "Case",
            ComponentSlot::Monitor => "Monitor",
            ComponentSlot::Keyboard => "Keyboard",
            ComponentSlot::Mouse => "Mouse",
            ComponentSlot::Headset => "Headset",
        }
    }
}

impl fmt::Display for ComponentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSlot(pub String);

impl fmt::Display for UnknownSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown component type: {}", self.0)
    }
}

impl std::error::Error for UnknownSlot {}

impl FromStr for ComponentSlot {
    type Err = UnknownSlot;

    // 服务端枚举是大写 (CPU)，前端使用小写 (cpu)，两者都接受
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentSlot::ALL
            .into_iter()
            .find(|slot| slot.wire_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSlot(s.to_string()))
    }
}

impl Serialize for ComponentSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for ComponentSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 远端商品目录中的商品快照（只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: ProductId,
    pub name: String,
    #[serde(deserialize_with = "de_amount")]
    pub price: u64,
    #[serde(default)]
    pub stock: i32,
    #[serde(default, deserialize_with = "de_images")]
    pub images: Vec<String>,
    #[serde(default)]
    pub component_type: Option<ComponentSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u32>,
}

impl ProductRef {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// `GET /api/get-cart-build-pc` 返回列表中的一项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildCartLine {
    pub component_type: ComponentSlot,
    pub quantity: u32,
    pub product: ProductRef,
    #[serde(
        default,
        deserialize_with = "de_opt_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_price: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildCartStats {
    #[serde(default, deserialize_with = "de_amount")]
    pub total_price: u64,
    #[serde(default)]
    pub item_count: u64,
}

// =========================================================
// 反序列化辅助 (Serde Helpers)
// =========================================================

/// 价格在服务端是 BigDecimal，可能序列化为 `5000000` 或 `5000000.00`
fn de_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = serde_json::Number::deserialize(deserializer)?;
    number_to_amount(&value).map_err(serde::de::Error::custom)
}

fn de_opt_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    match Option::<serde_json::Number>::deserialize(deserializer)? {
        Some(n) => number_to_amount(&n).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn number_to_amount(n: &serde_json::Number) -> Result<u64, String> {
    if let Some(v) = n.as_u64() {
        return Ok(v);
    }
    match n.as_f64() {
        Some(v) if v >= 0.0 && v.is_finite() => Ok(v.round() as u64),
        _ => Err(format!("invalid amount: {}", n)),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImagesRepr {
    List(Vec<String>),
    Joined(String),
}

/// 图片字段既可能是数组，也可能是逗号分隔的字符串
fn de_images<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let images = match Option::<ImagesRepr>::deserialize(deserializer)? {
        Some(ImagesRepr::List(list)) => list,
        Some(ImagesRepr::Joined(joined)) => joined.split(',').map(str::to_string).collect(),
        None => Vec::new(),
    };
    Ok(images
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slot_parses_both_server_and_client_spelling() {
        assert_eq!("CPU".parse::<ComponentSlot>(), Ok(ComponentSlot::Cpu));
        assert_eq!("headset".parse::<ComponentSlot>(), Ok(ComponentSlot::Headset));
        assert!("gpu".parse::<ComponentSlot>().is_err());
        assert_eq!(
            serde_json::to_value(ComponentSlot::Case).unwrap(),
            json!("case")
        );
    }

    #[test]
    fn product_accepts_decimal_price_and_joined_images() {
        let product: ProductRef = serde_json::from_value(json!({
            "id": "7f1c2a9e-1b7a-4a53-9a3e-0c3a1c0f5b11",
            "name": "Ryzen 7",
            "price": 5000000.00,
            "stock": 10,
            "images": "a.png, b.png,",
            "componentType": "CPU"
        }))
        .unwrap();

        assert_eq!(product.price, 5_000_000);
        assert_eq!(product.images, vec!["a.png", "b.png"]);
        assert_eq!(product.component_type, Some(ComponentSlot::Cpu));
        assert_eq!(product.primary_image(), Some("a.png"));
    }

    #[test]
    fn product_defaults_missing_optional_fields() {
        let product: ProductRef = serde_json::from_value(json!({
            "id": "7f1c2a9e-1b7a-4a53-9a3e-0c3a1c0f5b11",
            "name": "Bare",
            "price": 10
        }))
        .unwrap();

        assert_eq!(product.stock, 0);
        assert!(product.images.is_empty());
        assert!(!product.in_stock());
    }
}
