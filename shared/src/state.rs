use std::cell::RefCell;
use std::rc::Rc;

/// 视图状态句柄
///
/// 控制器只通过这个 trait 读写状态，不关心状态放在哪里：
/// 前端是 Leptos 信号，测试里是 `Rc<RefCell<T>>`。
///
/// 视图卸载后实现必须返回 `None`，这样迟到的网络结果会被直接丢弃，
/// 而不会写进已经失效的状态。
pub trait ViewState<T> {
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R>;
    fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
}

impl<T> ViewState<T> for Rc<RefCell<T>> {
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}
