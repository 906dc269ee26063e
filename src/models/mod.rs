pub mod chat;
pub mod dialog;
pub mod queue;
pub mod reservation;

pub use chat::{ChatEnvelope, ChatMessage, UnstructuredMessage};
pub use dialog::{
    BotMessage, DialogActionType, DialogEvent, DialogResponse, IntentData, InvocationSource,
    SessionAttributes, Slot, SlotValue, Slots,
};
pub use queue::{MessageAttribute, MessageAttributes, QueueMessage};
pub use reservation::ReservationRequest;
