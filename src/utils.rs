//! Display and url helpers / 显示与地址工具函数

use crate::catalog::CatalogError;

/// Format a catalog id for display / 格式化编号
/// 1 -> "#001", 25 -> "#025", 1025 -> "#1025"
pub fn format_pokemon_id(id: u32) -> Result<String, CatalogError> {
    if id == 0 {
        return Err(CatalogError::InvalidId(0));
    }
    Ok(format!("#{:03}", id))
}

/// Upper-case the first character / 首字母大写
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Extract the trailing numeric id from a resource url / 从资源地址提取编号
/// "https://pokeapi.co/api/v2/pokemon/25/" -> Some(25)
pub fn id_from_resource_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u32>().ok())
        .filter(|id| *id > 0)
}
