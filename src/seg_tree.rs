use crate::span::Span;
use anyhow::{bail, Result};


/// 根のノード番号. ノード i の子は 2i, 2i+1 になる.
const ROOT: usize = 1;

/// `SegmentTree` は固定した閉区間上の整数列に対し, 区間への一様加算と区間和の取得を
/// どちらも O(log N) で行う. 完全二分木で, 各ノードがひとつの区間を受け持ち,
/// その子が区間の半分ずつを受け持つ. 葉は一点を受け持つ.
///
/// 木は Vec で表す. あるノードの値はその区間の総和で, 区間加算はノードに遅延タグとして
/// 積んでおき, 子の値を読む必要が出るまで押し下げない.
#[derive(Debug, Clone)]
pub struct SegmentTree {
    span: Span,
    values: Vec<i64>,
    tags: Vec<i64>,
}

impl SegmentTree {
    /// 全点が 0 の木を閉区間 [left_bound, right_bound] の上に作る.
    pub fn new(left_bound: i64, right_bound: i64) -> Result<Self> {
        let span = match Span::new(left_bound, right_bound) {
            Some(span) => span,
            None => bail!(
                "expected left_bound <= right_bound, but found [{}, {}]",
                left_bound,
                right_bound
            ),
        };
        Ok(Self::zeroed(span))
    }

    /// 数列 `values` を 0 始まりの添字で持つ木を作る. `values` が空のときは失敗する.
    pub fn from_values(values: &[i64]) -> Result<Self> {
        let span = match Span::new(0, values.len() as i64 - 1) {
            Some(span) => span,
            None => bail!("expected at least one value, but found none"),
        };
        let mut tree = Self::zeroed(span);
        tree.build(ROOT, span, values);
        Ok(tree)
    }

    fn zeroed(span: Span) -> Self {
        // 高さを正確に見積もらなくても, 区間の 4 倍あれば完全二分木に足りる.
        let capacity = 4 * span.count() as usize;
        Self {
            span,
            values: vec![0; capacity],
            tags: vec![0; capacity],
        }
    }

    /// 木が受け持つ閉区間.
    pub fn span(&self) -> Span {
        self.span
    }

    /// 閉区間 [left, right] の各点に `value` を加える.
    ///
    /// 木の区間からはみ出た部分は無視する. 区間全体が木の外にあるときや
    /// `left > right` のときは失敗し, 状態を変えない.
    pub fn add(&mut self, value: i64, left: i64, right: i64) -> Result<()> {
        let target = self.target_span(left, right)?;
        self.add_in(ROOT, self.span, value, target);
        Ok(())
    }

    /// 閉区間 [left, right] の総和を返す.
    ///
    /// 観測できる結果は読み取り専用だが, 遅延タグの押し下げで内部配列を
    /// 書き換えるため可変借用を取る.
    pub fn get_sum(&mut self, left: i64, right: i64) -> Result<i64> {
        let target = self.target_span(left, right)?;
        Ok(self.sum_in(ROOT, self.span, target))
    }

    /// 引数の閉区間を検証し, 木の区間との共通部分へ丸める.
    fn target_span(&self, left: i64, right: i64) -> Result<Span> {
        let requested = match Span::new(left, right) {
            Some(span) => span,
            None => bail!("expected left <= right, but found [{}, {}]", left, right),
        };
        match self.span.intersection(requested) {
            Some(target) => Ok(target),
            None => bail!(
                "expected a range intersecting {:?}, but found {:?}",
                self.span,
                requested
            ),
        }
    }

    /// ノード `node` (受け持ち区間 `span`) 以下を `values` の対応する要素で初期化する.
    fn build(&mut self, node: usize, span: Span, values: &[i64]) {
        if span.is_unit() {
            self.values[node] = values[span.left() as usize];
            return;
        }
        let (left, right) = span.halves();
        self.build(node * 2, left, values);
        self.build(node * 2 + 1, right, values);
        self.values[node] = self.values[node * 2] + self.values[node * 2 + 1];
    }

    fn add_in(&mut self, node: usize, span: Span, value: i64, target: Span) {
        // target がノードの区間を覆うなら子には反映せず, タグに積んで打ち切る.
        if target.contains(span) {
            self.values[node] += value * span.count();
            self.tags[node] += value;
            return;
        }

        // 子の値を触る前にタグを押し下げておく.
        self.push_down(node, span);

        let (left, right) = span.halves();
        if left.intersects(target) {
            self.add_in(node * 2, left, value, target);
        }
        if right.intersects(target) {
            self.add_in(node * 2 + 1, right, value, target);
        }

        self.values[node] = self.values[node * 2] + self.values[node * 2 + 1];
    }

    fn sum_in(&mut self, node: usize, span: Span, target: Span) -> i64 {
        // target がノードの区間を覆うなら, これより下を見る必要はない.
        if target.contains(span) {
            return self.values[node];
        }

        // 押し下げ前の子の値は古いので, 読む前にタグを反映する.
        self.push_down(node, span);

        let (left, right) = span.halves();
        let mut sum = 0;
        if left.intersects(target) {
            sum += self.sum_in(node * 2, left, target);
        }
        if right.intersects(target) {
            sum += self.sum_in(node * 2 + 1, right, target);
        }
        sum
    }

    /// 積んであるタグを両方の子へ押し下げる. 葉は子を持たないので何もしない.
    fn push_down(&mut self, node: usize, span: Span) {
        if self.tags[node] == 0 || span.is_unit() {
            return;
        }
        let tag = self.tags[node];
        let (left, right) = span.halves();
        self.tags[node * 2] += tag;
        self.tags[node * 2 + 1] += tag;
        self.values[node * 2] += tag * left.count();
        self.values[node * 2 + 1] += tag * right.count();
        self.tags[node] = 0;
    }
}
