/// Sqrt Treeの層の構成
///
/// 第`k`層は長さ`2^span_log(k)`の区間(スパン)を長さ`2^block_log(k)`のブロックに分割する.
/// `block_log(k) == span_log(k + 1)`なので, 第`k + 1`層のスパンは第`k`層のブロックにちょうど一致する.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerPlan {
    len: usize,
    log: u32,
    spans: Box<[u32]>,
    on_layer: Box<[usize]>,
}

impl LayerPlan {
    /// 長さ`len`の列に対する層の構成を計算する.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    pub fn new(len: usize) -> Self {
        let log = ceil_log2(len);
        let mut spans = Vec::new();
        let mut on_layer = vec![0; log as usize + 1];
        let mut k = log;
        while k > 1 {
            on_layer[k as usize] = spans.len();
            spans.push(k);
            k = (k + 1) >> 1;
        }
        for b in (0..log as usize).rev() {
            on_layer[b] = on_layer[b].max(on_layer[b + 1]);
        }
        Self {
            len,
            log,
            spans: spans.into(),
            on_layer: on_layer.into(),
        }
    }

    /// 対象の列の長さを返す
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 対象の列が空かどうか調べる
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `2^log >= len`を満たす最小の`log`
    #[must_use]
    pub fn log(&self) -> u32 {
        self.log
    }

    /// 層の数を返す. 長さが2以下なら0
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.spans.len()
    }

    /// 各層のスパンの指数の列
    #[must_use]
    pub fn spans(&self) -> &[u32] {
        &self.spans
    }

    /// 第`layer`層のスパンの長さの指数
    #[must_use]
    pub fn span_log(&self, layer: usize) -> u32 {
        self.spans[layer]
    }

    /// 第`layer`層のブロックの長さの指数
    #[must_use]
    pub fn block_log(&self, layer: usize) -> u32 {
        (self.spans[layer] + 1) >> 1
    }

    /// `left`と`right`を同じスパンに含み, かつ別々のブロックに分ける層を返す.
    ///
    /// # Constraints
    ///
    /// - `left < right < self.len()`
    /// - `right - left >= 2`
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn covering_layer(&self, left: usize, right: usize) -> usize {
        debug_assert!(left < right && right < self.len && right - left >= 2);
        let bits = usize::BITS - (left ^ right).leading_zeros();
        self.on_layer[bits as usize]
    }
}

/// `2^k >= n`を満たす最小の`k`
fn ceil_log2(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans() {
        assert_eq!(LayerPlan::new(1).spans(), &[] as &[u32]);
        assert_eq!(LayerPlan::new(2).spans(), &[] as &[u32]);
        assert_eq!(LayerPlan::new(3).spans(), &[2]);
        assert_eq!(LayerPlan::new(4).spans(), &[2]);
        assert_eq!(LayerPlan::new(5).spans(), &[3, 2]);
        assert_eq!(LayerPlan::new(17).spans(), &[5, 3, 2]);
        assert_eq!(LayerPlan::new(1000).spans(), &[10, 5, 3, 2]);
        assert_eq!(LayerPlan::new(1 << 16).spans(), &[16, 8, 4, 2]);
        assert_eq!(LayerPlan::new((1 << 16) + 1).spans(), &[17, 9, 5, 3, 2]);
    }

    #[test]
    fn log() {
        assert_eq!(LayerPlan::new(0).log(), 0);
        assert_eq!(LayerPlan::new(1).log(), 0);
        assert_eq!(LayerPlan::new(2).log(), 1);
        assert_eq!(LayerPlan::new(3).log(), 2);
        assert_eq!(LayerPlan::new(1024).log(), 10);
        assert_eq!(LayerPlan::new(1025).log(), 11);
    }

    #[test]
    fn blocks_nest() {
        for n in [3, 5, 17, 100, 1000, 70000] {
            let plan = LayerPlan::new(n);
            assert_eq!(plan.span_log(0), plan.log());
            for k in 1..plan.layer_count() {
                assert_eq!(plan.block_log(k - 1), plan.span_log(k));
            }
        }
    }

    #[test]
    fn covering_layer_is_deepest() {
        for n in [3, 4, 5, 8, 17, 33, 130, 300] {
            let plan = LayerPlan::new(n);
            for l in 0..n {
                for r in l + 2..n {
                    let layer = plan.covering_layer(l, r);
                    let span = plan.span_log(layer);
                    let block = plan.block_log(layer);
                    assert_eq!(l >> span, r >> span, "n={n} l={l} r={r}");
                    assert_ne!(l >> block, r >> block, "n={n} l={l} r={r}");
                }
            }
        }
    }
}
