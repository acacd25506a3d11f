use bevy_ecs::prelude::*;
use futures_channel::oneshot;

use super::framing::{CameraFrame, FramingScales};
use super::geospatial::GeoPoint;

pub struct SceneReadiness;

impl SceneReadiness {
    pub fn channel() -> (ReadySignal, ReadyListener) {
        let (sender, receiver) = oneshot::channel();
        (ReadySignal { sender }, ReadyListener { receiver })
    }
}

/// Held by whoever mounts the scene. Dropping it without calling
/// [`ReadySignal::notify`] means the scene never becomes ready.
#[derive(Debug)]
pub struct ReadySignal {
    sender: oneshot::Sender<()>,
}

impl ReadySignal {
    pub fn notify(self) {
        // the listener is gone once the scene was torn down
        let _ = self.sender.send(());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Pending,
    Ready,
    Abandoned,
}

#[derive(Debug)]
pub struct ReadyListener {
    receiver: oneshot::Receiver<()>,
}

impl ReadyListener {
    /// Non-blocking check, called once per frame.
    pub fn poll(&mut self) -> ReadyState {
        match self.receiver.try_recv() {
            Ok(Some(())) => ReadyState::Ready,
            Ok(None) => ReadyState::Pending,
            Err(oneshot::Canceled) => ReadyState::Abandoned,
        }
    }

    pub async fn wait(self) -> bool {
        self.receiver.await.is_ok()
    }
}

/// Frames `point` once the scene reports ready. Resolves to `None` when the
/// signal is dropped first.
pub async fn frame_when_ready(
    listener: ReadyListener,
    point: GeoPoint,
    scales: FramingScales,
) -> Option<CameraFrame> {
    if listener.wait().await {
        Some(scales.frame(point))
    } else {
        None
    }
}

#[derive(Resource, Debug)]
pub struct Readiness {
    listener: Option<ReadyListener>,
    state: ReadyState,
}

impl Readiness {
    pub fn new(listener: ReadyListener) -> Self {
        Self {
            listener: Some(listener),
            state: ReadyState::Pending,
        }
    }

    pub fn state(&self) -> ReadyState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == ReadyState::Ready
    }

    fn refresh(&mut self) -> ReadyState {
        if let Some(listener) = self.listener.as_mut() {
            self.state = listener.poll();
            if self.state != ReadyState::Pending {
                self.listener = None;
            }
        }
        self.state
    }
}

/// Framing request waiting for the scene to become ready. Only the latest
/// selection is kept.
#[derive(Resource, Debug, Default)]
pub struct PendingFraming {
    point: Option<GeoPoint>,
}

impl PendingFraming {
    pub fn request(&mut self, point: GeoPoint) {
        self.point = Some(point);
    }

    pub fn discard(&mut self) {
        self.point = None;
    }

    pub fn is_pending(&self) -> bool {
        self.point.is_some()
    }

    pub fn take_if_ready(&mut self, readiness: &Readiness) -> Option<GeoPoint> {
        if readiness.is_ready() {
            self.point.take()
        } else {
            None
        }
    }
}

pub fn poll_readiness(mut readiness: ResMut<Readiness>) {
    let before = readiness.state();
    let after = readiness.refresh();
    if before != after {
        match after {
            ReadyState::Ready => tracing::info!("scene ready"),
            ReadyState::Abandoned => {
                tracing::warn!("ready signal dropped before the scene was ready, camera framing disabled")
            }
            ReadyState::Pending => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_reports_pending_until_notified() {
        let (signal, mut listener) = SceneReadiness::channel();
        assert_eq!(listener.poll(), ReadyState::Pending);
        signal.notify();
        assert_eq!(listener.poll(), ReadyState::Ready);
    }

    #[test]
    fn dropped_signal_abandons_readiness() {
        let (signal, listener) = SceneReadiness::channel();
        drop(signal);
        let mut readiness = Readiness::new(listener);
        assert_eq!(readiness.refresh(), ReadyState::Abandoned);
        assert!(!readiness.is_ready());
    }

    #[test]
    fn readiness_latches_once_ready() {
        let (signal, listener) = SceneReadiness::channel();
        let mut readiness = Readiness::new(listener);
        assert_eq!(readiness.refresh(), ReadyState::Pending);
        signal.notify();
        assert_eq!(readiness.refresh(), ReadyState::Ready);
        assert_eq!(readiness.refresh(), ReadyState::Ready);
    }

    #[test]
    fn pending_framing_waits_and_keeps_latest() {
        let (signal, listener) = SceneReadiness::channel();
        let mut readiness = Readiness::new(listener);
        let mut pending = PendingFraming::default();

        pending.request(GeoPoint::new(46.2276, 2.2137));
        pending.request(GeoPoint::new(36.2048, 138.2529));
        assert_eq!(pending.take_if_ready(&readiness), None);
        assert!(pending.is_pending());

        signal.notify();
        readiness.refresh();
        assert_eq!(pending.take_if_ready(&readiness), Some(GeoPoint::new(36.2048, 138.2529)));
        assert!(!pending.is_pending());
    }

    #[test]
    fn discarded_request_never_fires() {
        let (signal, listener) = SceneReadiness::channel();
        let mut readiness = Readiness::new(listener);
        let mut pending = PendingFraming::default();
        pending.request(GeoPoint::new(20.5937, 78.9629));
        pending.discard();
        signal.notify();
        readiness.refresh();
        assert_eq!(pending.take_if_ready(&readiness), None);
    }

    #[test]
    fn awaiting_readiness_yields_a_frame() {
        let (signal, listener) = SceneReadiness::channel();
        let point = GeoPoint::new(-25.2744, 133.7751);
        signal.notify();
        let frame = pollster::block_on(frame_when_ready(listener, point, FramingScales::default()));
        assert_eq!(frame, Some(FramingScales::default().frame(point)));
    }

    #[test]
    fn awaiting_abandoned_readiness_yields_nothing() {
        let (signal, listener) = SceneReadiness::channel();
        drop(signal);
        let frame = pollster::block_on(frame_when_ready(
            listener,
            GeoPoint::new(51.1657, 10.4515),
            FramingScales::default(),
        ));
        assert_eq!(frame, None);
    }
}
