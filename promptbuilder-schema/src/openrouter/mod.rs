mod chat;
mod model_list;

pub use chat::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatReplyMessage,
};
pub use model_list::{OpenRouterModel, OpenRouterModelList, OpenRouterPricing};
