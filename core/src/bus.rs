use alloc::collections::{BTreeSet, VecDeque};
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell as StdCell, RefCell};
use core::fmt;

use crate::*;

/// Weak handle to a mounted board, handed out with its ready notification.
pub type BoardRef = Weak<RefCell<dyn BoardAccess>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<M> = Rc<dyn Fn(&M)>;

/// Single-threaded broadcast channel.
///
/// Every subscriber sees every message, in subscription order. Messages published while a dispatch is
/// in progress are queued and delivered after it, so delivery runs to completion and never nests.
pub struct Channel<M> {
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber<M>)>>,
    queue: RefCell<VecDeque<M>>,
    dispatching: StdCell<bool>,
    next_id: StdCell<u64>,
}

impl<M> Default for Channel<M> {
    fn default() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
            queue: RefCell::new(VecDeque::new()),
            dispatching: StdCell::new(false),
            next_id: StdCell::new(0),
        }
    }
}

impl<M> Channel<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&M) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(subscriber)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(other, _)| *other != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn publish(&self, message: M) {
        self.queue.borrow_mut().push_back(message);
        if self.dispatching.replace(true) {
            return;
        }

        loop {
            let Some(message) = self.queue.borrow_mut().pop_front() else {
                break;
            };
            // subscribers may (un)subscribe while being called
            let subscribers: Vec<Subscriber<M>> = self
                .subscribers
                .borrow()
                .iter()
                .map(|(_, subscriber)| Rc::clone(subscriber))
                .collect();
            for subscriber in subscribers {
                subscriber(&message);
            }
        }

        self.dispatching.set(false);
    }
}

impl<M> fmt::Debug for Channel<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("subscribers", &self.subscriber_count())
            .field("queued", &self.queue.borrow().len())
            .finish()
    }
}

/// What boards tell the game logic.
#[derive(Clone)]
pub enum Notification {
    /// A board finished mounting and accepts commands.
    Ready { detail: ReadyDetail, handle: BoardRef },
    /// A non-suppressed cell was clicked while clicks were enabled.
    Click(ClickDetail),
}

impl Notification {
    pub fn id(&self) -> &BoardId {
        match self {
            Self::Ready { detail, .. } => &detail.id,
            Self::Click(detail) => &detail.id,
        }
    }

    /// The mounted board, if it is still alive. Only ready notifications carry one.
    pub fn board(&self) -> Option<Rc<RefCell<dyn BoardAccess>>> {
        match self {
            Self::Ready { handle, .. } => handle.upgrade(),
            Self::Click(_) => None,
        }
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready { detail, .. } => f.debug_tuple("Ready").field(detail).finish(),
            Self::Click(detail) => f.debug_tuple("Click").field(detail).finish(),
        }
    }
}

/// The channels shared by every board on a page and the game logic driving them.
///
/// Commands go to all boards and each keeps only those addressed to it. Ids are registered on mount
/// so two boards can never answer to the same id.
#[derive(Debug, Default)]
pub struct Bus {
    commands: Channel<Addressed<Command>>,
    notifications: Channel<Notification>,
    registry: RefCell<BTreeSet<BoardId>>,
}

impl Bus {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn commands(&self) -> &Channel<Addressed<Command>> {
        &self.commands
    }

    pub fn notifications(&self) -> &Channel<Notification> {
        &self.notifications
    }

    pub fn register(&self, id: &BoardId) -> Result<()> {
        if self.registry.borrow_mut().insert(id.clone()) {
            log::debug!("board {} registered", id);
            Ok(())
        } else {
            Err(BoardError::DuplicateId(id.clone()))
        }
    }

    pub fn unregister(&self, id: &BoardId) -> bool {
        let removed = self.registry.borrow_mut().remove(id);
        if removed {
            log::debug!("board {} unregistered", id);
        }
        removed
    }

    pub fn is_registered(&self, id: &BoardId) -> bool {
        self.registry.borrow().contains(id)
    }

    /// Broadcasts a command to every board.
    pub fn send(&self, id: impl Into<BoardId>, command: Command) {
        let message = Addressed::new(id, command);
        log::trace!("bus <- {} for {}", message.payload.name(), message.id);
        self.commands.publish(message);
    }

    pub fn notify(&self, notification: Notification) {
        log::trace!("bus -> {:?}", notification);
        self.notifications.publish(notification);
    }

    /// Subscribes to notifications from a single board.
    pub fn on_notification(
        &self,
        id: impl Into<BoardId>,
        handler: impl Fn(&Notification) + 'static,
    ) -> SubscriptionId {
        let id = id.into();
        self.notifications.subscribe(move |notification| {
            if *notification.id() == id {
                handler(notification);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn every_subscriber_sees_every_message() {
        let channel = Channel::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in 0..2 {
            let seen = Rc::clone(&seen);
            channel.subscribe(move |&message| seen.borrow_mut().push((tag, message)));
        }

        channel.publish(7);
        channel.publish(8);

        assert_eq!(*seen.borrow(), vec![(0, 7), (1, 7), (0, 8), (1, 8)]);
    }

    #[test]
    fn nested_publish_is_delivered_after_current_message() {
        let channel = Rc::new(Channel::<u32>::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            let weak = Rc::downgrade(&channel);
            channel.subscribe(move |&message| {
                seen.borrow_mut().push(message);
                if message == 1 {
                    if let Some(channel) = weak.upgrade() {
                        channel.publish(2);
                    }
                }
            });
        }
        {
            let seen = Rc::clone(&seen);
            channel.subscribe(move |&message| seen.borrow_mut().push(message * 10));
        }

        channel.publish(1);

        assert_eq!(*seen.borrow(), vec![1, 10, 2, 20]);
    }

    #[test]
    fn unsubscribed_handlers_stop_receiving() {
        let channel = Channel::<u32>::new();
        let count = Rc::new(StdCell::new(0));
        let id = {
            let count = Rc::clone(&count);
            channel.subscribe(move |_| count.set(count.get() + 1))
        };

        channel.publish(1);
        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        channel.publish(2);

        assert_eq!(count.get(), 1);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn registry_rejects_duplicate_ids() {
        let bus = Bus::new();
        let id = BoardId::from("tablero");

        assert_eq!(bus.register(&id), Ok(()));
        assert_eq!(bus.register(&id), Err(BoardError::DuplicateId(id.clone())));
        assert!(bus.unregister(&id));
        assert!(!bus.is_registered(&id));
        assert_eq!(bus.register(&id), Ok(()));
    }

    #[test]
    fn notification_filter_matches_board_id() {
        let bus = Bus::new();
        let clicks = Rc::new(RefCell::new(Vec::new()));
        {
            let clicks = Rc::clone(&clicks);
            bus.on_notification("a", move |notification| {
                if let Notification::Click(detail) = notification {
                    clicks.borrow_mut().push(detail.cell());
                }
            });
        }

        let click = |id: &str, cell: Coord2| ClickDetail {
            id: id.into(),
            mousex: 0,
            mousey: 0,
            cellx: cell.0,
            celly: cell.1,
            content: Content::Empty,
            color: Color::BLACK,
            bgcolor: Color::WHITE,
        };
        bus.notify(Notification::Click(click("b", (0, 0))));
        bus.notify(Notification::Click(click("a", (1, 2))));

        assert_eq!(*clicks.borrow(), vec![(1, 2)]);
    }
}
