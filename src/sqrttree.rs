use super::error::SqrtTreeError;
use super::layerplan::LayerPlan;
use super::util::Semigroup;

/// 1つの層が持つ表
#[derive(Clone)]
struct Layer<T> {
    /// ブロックの先頭から各位置までの総積
    prefix: Box<[T]>,
    /// 各位置からブロックの末尾までの総積
    suffix: Box<[T]>,
    /// スパンごとに, ブロックの対`(i, j)` (`i <= j`)の総積を行優先の上三角に並べたもの.
    /// 第0層では派生列の木が代わりを務めるので空
    between: Box<[T]>,
}

/// 層の表と派生列の木をまとめたもの
#[derive(Clone)]
struct Hierarchy<T> {
    items: Box<[T]>,
    plan: LayerPlan,
    layers: Box<[Layer<T>]>,
    /// 第0層の各ブロックの総積を並べた列の木. 層が無いときは`None`
    index: Option<Box<Hierarchy<T>>>,
}

/// `[l, r)`のブロックの`prefix`と`suffix`を計算し直す
fn fold_block<M: Semigroup>(
    op: &M,
    items: &[M::T],
    prefix: &mut [M::T],
    suffix: &mut [M::T],
    l: usize,
    r: usize,
) {
    prefix[l] = items[l].clone();
    for i in l + 1..r {
        prefix[i] = op.op(&prefix[i - 1], &items[i]);
    }
    suffix[r - 1] = items[r - 1].clone();
    for i in (l..r - 1).rev() {
        suffix[i] = op.op(&items[i], &suffix[i + 1]);
    }
}

/// スパン`[l, r)`内のブロック対の総積を, 格納順に`emit`へ渡す
fn fold_between<M: Semigroup>(
    op: &M,
    suffix: &[M::T],
    l: usize,
    r: usize,
    block_log: u32,
    mut emit: impl FnMut(M::T),
) {
    let count = (r - l).div_ceil(1 << block_log);
    for i in 0..count {
        let mut acc = suffix[l + (i << block_log)].clone();
        for j in i + 1..count {
            let next = op.op(&acc, &suffix[l + (j << block_log)]);
            emit(std::mem::replace(&mut acc, next));
        }
        emit(acc);
    }
}

/// 第`layer`層で`span_start`から始まるスパンのブロック対`(i, j)`の格納位置
fn between_index(plan: &LayerPlan, layer: usize, span_start: usize, i: usize, j: usize) -> usize {
    let span_log = plan.span_log(layer);
    let block_log = plan.block_log(layer);
    let full = 1usize << (span_log - block_log);
    // 長さが足りないのは末尾のスパンだけ
    let count = full.min((plan.len() - span_start).div_ceil(1 << block_log));
    (span_start >> span_log) * (full * (full + 1) / 2) + i * (2 * count - i + 1) / 2 + (j - i)
}

impl<T: Clone> Hierarchy<T> {
    /// 空でない列から構築する
    fn build<M: Semigroup<T = T>>(op: &M, items: Vec<T>) -> Self {
        let n = items.len();
        let plan = LayerPlan::new(n);
        let mut layers = Vec::with_capacity(plan.layer_count());
        for k in 0..plan.layer_count() {
            let block_log = plan.block_log(k);
            let mut prefix: Box<[T]> = items.clone().into();
            let mut suffix = prefix.clone();
            for l in (0..n).step_by(1 << block_log) {
                let r = (l + (1 << block_log)).min(n);
                fold_block(op, &items, &mut prefix, &mut suffix, l, r);
            }
            let mut between = Vec::new();
            if k > 0 {
                let span_log = plan.span_log(k);
                for l in (0..n).step_by(1 << span_log) {
                    let r = (l + (1 << span_log)).min(n);
                    fold_between(op, &suffix, l, r, block_log, |v| between.push(v));
                }
            }
            layers.push(Layer {
                prefix,
                suffix,
                between: between.into(),
            });
        }
        let index = layers.first().map(|layer| {
            let derived = (0..n)
                .step_by(1 << plan.block_log(0))
                .map(|l| layer.suffix[l].clone())
                .collect();
            Box::new(Self::build(op, derived))
        });
        Self {
            items: items.into(),
            plan,
            layers: layers.into(),
            index,
        }
    }

    fn depth(&self) -> usize {
        self.index.as_ref().map_or(0, |index| index.depth() + 1)
    }

    fn query<M: Semigroup<T = T>>(&self, op: &M, l: usize, r: usize) -> T {
        if l == r {
            return self.items[l].clone();
        }
        if l + 1 == r {
            return op.op(&self.items[l], &self.items[r]);
        }
        let k = self.plan.covering_layer(l, r);
        let layer = &self.layers[k];
        let span_log = self.plan.span_log(k);
        let block_log = self.plan.block_log(k);
        let span_start = (l >> span_log) << span_log;
        // `l`のブロックと`r`のブロックの間にある完全なブロックは`first..last`
        let first = ((l - span_start) >> block_log) + 1;
        let last = (r - span_start) >> block_log;
        let mut ans = layer.suffix[l].clone();
        if first < last {
            let middle = match &self.index {
                Some(index) if k == 0 => index.query(op, first, last - 1),
                _ => layer.between[between_index(&self.plan, k, span_start, first, last - 1)].clone(),
            };
            ans = op.op(&ans, &middle);
        }
        op.op(&ans, &layer.prefix[r])
    }

    fn update<M: Semigroup<T = T>>(&mut self, op: &M, x: usize, value: T) {
        self.items[x] = value;
        let n = self.items.len();
        for (k, layer) in self.layers.iter_mut().enumerate() {
            let block_log = self.plan.block_log(k);
            let l = (x >> block_log) << block_log;
            let r = (l + (1 << block_log)).min(n);
            fold_block(op, &self.items, &mut layer.prefix, &mut layer.suffix, l, r);
            if k == 0 {
                if let Some(index) = self.index.as_mut() {
                    index.update(op, x >> block_log, layer.suffix[l].clone());
                }
            } else {
                let span_log = self.plan.span_log(k);
                let span_start = (x >> span_log) << span_log;
                let span_end = (span_start + (1 << span_log)).min(n);
                let mut at = between_index(&self.plan, k, span_start, 0, 0);
                fold_between(op, &layer.suffix, span_start, span_end, block_log, |v| {
                    layer.between[at] = v;
                    at += 1;
                });
            }
        }
    }
}

/// 区間の総積を*O*(1)で, 一点更新を*O*(√*n*)で処理できるデータ構造
///
/// 演算は結合律さえ満たせばよく, 単位元も交換則も要求しない.
/// 区間の総積は要素の並び順どおりに計算される.
///
/// ```
/// use sqrttree::sqrttree::SqrtTree;
/// use sqrttree::util::Min;
///
/// let mut tree = SqrtTree::new(Min::new(), vec![5, 3, 8, 1, 9, 2]).unwrap();
/// assert_eq!(tree.query(1, 4), Ok(1));
/// tree.update(2, 0).unwrap();
/// assert_eq!(tree.query(0, 3), Ok(0));
/// assert_eq!(tree.query(4, 5), Ok(2));
/// ```
#[derive(Clone)]
pub struct SqrtTree<M: Semigroup> {
    tree: Hierarchy<M::T>,
    op: M,
}

impl<M: Semigroup> SqrtTree<M> {
    /// 列`items`と演算`op`からSqrtTreeを構築する.
    ///
    /// # Errors
    ///
    /// - `items`が空なら[`SqrtTreeError::InvalidConstruction`]
    ///
    /// # Time complexity
    ///
    /// - *O*(*n* log log *n*)
    pub fn new(op: M, items: impl Into<Vec<M::T>>) -> Result<Self, SqrtTreeError> {
        let items: Vec<M::T> = items.into();
        if items.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::trace!("rejected construction from an empty sequence");
            return Err(SqrtTreeError::InvalidConstruction);
        }
        let tree = Hierarchy::build(&op, items);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            len = tree.items.len(),
            spans = ?tree.plan.spans(),
            depth = tree.depth(),
            "built sqrt tree"
        );
        Ok(Self { tree, op })
    }

    /// 列の長さを返す
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.items.len()
    }

    /// 列が空かどうか調べる. 構築に成功していれば常に`false`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.items.is_empty()
    }

    /// 構築に使った演算を返す
    #[must_use]
    pub fn operator(&self) -> &M {
        &self.op
    }

    /// ブロックの総積の列を入れ子にした段数を返す.
    ///
    /// *O*(log log *n*)に収まる.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    /// `index`番目の要素を返す
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&M::T> {
        self.tree.items.get(index)
    }

    /// 閉区間`[left, right]`の総積`a[left] ⊕ ... ⊕ a[right]`を計算する.
    ///
    /// # Errors
    ///
    /// - `left <= right < self.len()`を満たさなければ[`SqrtTreeError::InvalidRange`]
    ///
    /// # Time complexity
    ///
    /// - *O*(1) 回の表引き (派生列への再帰は高々*O*(log log *n*)段)
    pub fn query(&self, left: usize, right: usize) -> Result<M::T, SqrtTreeError> {
        let len = self.len();
        if left > right || right >= len {
            #[cfg(feature = "tracing")]
            tracing::trace!(left, right, len, "rejected query");
            return Err(SqrtTreeError::InvalidRange { left, right, len });
        }
        Ok(self.tree.query(&self.op, left, right))
    }

    /// `range`の範囲の総積を計算する. 空の範囲は総積が定義されないのでエラーになる.
    ///
    /// # Errors
    ///
    /// - `range`が空であるか`0..self.len()`に含まれなければ[`SqrtTreeError::InvalidRange`]
    ///
    /// # Time complexity
    ///
    /// - [`Self::query`]と同じ
    pub fn fold(&self, range: impl std::ops::RangeBounds<usize>) -> Result<M::T, SqrtTreeError> {
        let len = self.len();
        let left = match range.start_bound() {
            std::ops::Bound::Included(&i) => i,
            std::ops::Bound::Excluded(&i) => i.saturating_add(1),
            std::ops::Bound::Unbounded => 0,
        };
        let right = match range.end_bound() {
            std::ops::Bound::Included(&i) => i.saturating_add(1),
            std::ops::Bound::Excluded(&i) => i,
            std::ops::Bound::Unbounded => len,
        };
        match right.checked_sub(1) {
            Some(right) => self.query(left, right),
            None => Err(SqrtTreeError::InvalidRange {
                left,
                right: 0,
                len,
            }),
        }
    }

    /// `index`番目の値を`value`に設定する.
    ///
    /// # Errors
    ///
    /// - `index >= self.len()`なら[`SqrtTreeError::InvalidIndex`]
    ///
    /// # Time complexity
    ///
    /// - *O*(√*n*)
    pub fn update(&mut self, index: usize, value: M::T) -> Result<(), SqrtTreeError> {
        let len = self.len();
        if index >= len {
            #[cfg(feature = "tracing")]
            tracing::trace!(index, len, "rejected update");
            return Err(SqrtTreeError::InvalidIndex { index, len });
        }
        self.tree.update(&self.op, index, value);
        Ok(())
    }

    /// 元の列を取り出す
    #[must_use]
    pub fn into_vec(self) -> Vec<M::T> {
        self.tree.items.into_vec()
    }
}

impl<M: Semigroup + Default> TryFrom<Vec<M::T>> for SqrtTree<M> {
    type Error = SqrtTreeError;

    fn try_from(value: Vec<M::T>) -> Result<Self, SqrtTreeError> {
        Self::new(M::default(), value)
    }
}

impl<M: Semigroup> AsRef<[M::T]> for SqrtTree<M> {
    fn as_ref(&self) -> &[M::T] {
        &self.tree.items
    }
}

impl<M: Semigroup> std::ops::Index<usize> for SqrtTree<M> {
    type Output = M::T;

    fn index(&self, index: usize) -> &M::T {
        &self.tree.items[index]
    }
}
