use cynic::http::ReqwestExt;
use cynic::serde;
use reqwest::Url;

pub struct Client {
    client: reqwest::Client,
    url: Url,
}

impl Client {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Runs a query or mutation operation against the endpoint.
    pub async fn run<Op, Input>(
        &self,
        op: cynic::Operation<Op, Input>,
    ) -> cynic::GraphQlResponse<Op>
    where
        Input: serde::Serialize,
        Op: serde::de::DeserializeOwned + 'static,
    {
        self.client
            .post(self.url.clone())
            .run_graphql(op)
            .await
            .unwrap()
    }
}

#[cynic::schema("library")]
mod schema {}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct Library {
    pub authors: Vec<Author>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub books: Vec<Book>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author_id: i32,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct BookArguments {
    pub id: Option<i32>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "BookArguments")]
pub struct BookById {
    #[arguments(id: $id)]
    pub book: Option<BookWithAuthor>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Book")]
pub struct BookWithAuthor {
    pub id: i32,
    pub name: String,
    pub author_id: i32,
    pub author: Option<AuthorName>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Author")]
pub struct AuthorName {
    pub id: i32,
    pub name: String,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct AddAuthorArguments {
    pub name: String,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "AddAuthorArguments")]
pub struct AddAuthor {
    #[arguments(name: $name)]
    pub add_author: AuthorName,
}
