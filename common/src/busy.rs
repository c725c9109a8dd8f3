//! 処理中フラグのスコープガード
//!
//! 取得時に `set(true)`、ドロップ時に `set(false)` を呼ぶ。
//! エラーで早期returnしてもフラグが戻る。

pub struct BusyGuard<F: Fn(bool)> {
    set: F,
}

impl<F: Fn(bool)> BusyGuard<F> {
    pub fn acquire(set: F) -> Self {
        set(true);
        Self { set }
    }

    /// すでに処理中ならNone
    pub fn try_acquire(currently_busy: bool, set: F) -> Option<Self> {
        if currently_busy {
            None
        } else {
            Some(Self::acquire(set))
        }
    }
}

impl<F: Fn(bool)> Drop for BusyGuard<F> {
    fn drop(&mut self) {
        (self.set)(false);
    }
}
