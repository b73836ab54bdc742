//! 結合的な演算の区間クエリを*O*(1)で処理する Sqrt Tree
//!
//! 列をおよそ√*n*ずつのブロックに分ける層を*O*(log log *n*)段重ね,
//! 各層でブロック内の累積と, スパン内のブロック間の総積を前計算しておく.
//! 最上位の層のブロックの総積の列は, 同じ構造を入れ子にして扱う.

pub mod error;
pub mod layerplan;
pub mod sqrttree;
pub mod util;

pub use error::SqrtTreeError;
pub use sqrttree::SqrtTree;
