use serde::{Deserialize, Deserializer};

/// 「キーなし」と「null」を区別して受け取るためのデシリアライザ
///
/// `#[serde(default, deserialize_with = "nullable_field")]` と組み合わせると
/// キーなしは `None`、null は `Some(None)`、値ありは `Some(Some(v))` になる。
pub fn nullable_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
