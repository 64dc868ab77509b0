use leptos::prelude::*;
use userdesk_shared::ViewState;

/// 以 Leptos 信号承载的视图状态
///
/// 信号随组件 Owner 一起销毁，销毁后 `try_*` 返回 `None`，
/// 控制器据此丢弃迟到的请求结果。
pub struct SignalState<T: 'static>(pub RwSignal<T>);

impl<T: 'static> Clone for SignalState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for SignalState<T> {}

impl<T: Send + Sync + 'static> SignalState<T> {
    pub fn new(value: T) -> Self {
        Self(RwSignal::new(value))
    }

    pub fn signal(&self) -> RwSignal<T> {
        self.0
    }
}

impl<T: Send + Sync + 'static> ViewState<T> for SignalState<T> {
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.0.try_with_untracked(f)
    }

    fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}
