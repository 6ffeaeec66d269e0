use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

mod db;
mod middleware;
mod models;
mod routes;
mod services;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    println!("Got MongoDB URI, attempting connection...");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(client.clone()))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    // Public routes
                    .service(
                        web::scope("/auth")
                            .route("/signup", web::post().to(routes::account::signup))
                            .route("/signin", web::post().to(routes::account::signin))
                            .route(
                                "/owner-signin",
                                web::post().to(routes::account::owner_signin),
                            )
                            .service(
                                web::scope("").wrap(middleware::auth::AuthMiddleware).route(
                                    "/session",
                                    web::get().to(routes::account::user_session),
                                ),
                            ),
                    )
                    .configure(routes::admin::config)
                    // Staff routes
                    .service(
                        web::scope("")
                            .wrap(middleware::auth::AuthMiddleware)
                            .service(
                                web::scope("/bookings")
                                    .route(
                                        "/today-checkins",
                                        web::get().to(routes::bookings::today_checkins),
                                    )
                                    .route(
                                        "/today-checkouts",
                                        web::get().to(routes::bookings::today_checkouts),
                                    )
                                    .route("", web::get().to(routes::bookings::get_all_bookings))
                                    .route("", web::post().to(routes::bookings::add_booking))
                                    .route(
                                        "/{id}",
                                        web::get().to(routes::bookings::get_booking_by_id),
                                    )
                                    .route("/{id}", web::put().to(routes::bookings::update_booking))
                                    .route(
                                        "/{id}",
                                        web::delete().to(routes::bookings::remove_booking),
                                    )
                                    .route(
                                        "/{id}/status",
                                        web::put().to(routes::bookings::update_booking_status),
                                    ),
                            )
                            .service(
                                web::scope("/rooms")
                                    .route("", web::get().to(routes::rooms::get_rooms))
                                    .route("", web::post().to(routes::rooms::create_room))
                                    .route(
                                        "/by-number/{number}",
                                        web::get().to(routes::rooms::get_room_by_number),
                                    )
                                    .route("/{id}", web::get().to(routes::rooms::get_room_by_id))
                                    .route("/{id}", web::put().to(routes::rooms::update_room))
                                    .route(
                                        "/{id}/status",
                                        web::put().to(routes::rooms::update_room_status),
                                    ),
                            )
                            .service(
                                web::scope("/owners")
                                    .route("", web::get().to(routes::owners::get_owners))
                                    .route("", web::post().to(routes::owners::create_owner))
                                    .route("/{id}", web::put().to(routes::owners::update_owner)),
                            )
                            .service(
                                web::scope("/expenses")
                                    .route("", web::get().to(routes::expenses::get_expenses))
                                    .route("", web::post().to(routes::expenses::create_expense))
                                    .route(
                                        "/{id}",
                                        web::get().to(routes::expenses::get_expense_by_id),
                                    )
                                    .route(
                                        "/{id}",
                                        web::put().to(routes::expenses::update_expense),
                                    ),
                            )
                            .service(
                                web::scope("/cleaning-tasks")
                                    .route(
                                        "",
                                        web::get().to(routes::cleaning_tasks::get_cleaning_tasks),
                                    )
                                    .route(
                                        "",
                                        web::post()
                                            .to(routes::cleaning_tasks::create_cleaning_task),
                                    )
                                    .route(
                                        "/{id}/status",
                                        web::put().to(
                                            routes::cleaning_tasks::update_cleaning_task_status,
                                        ),
                                    ),
                            )
                            .service(
                                web::scope("/properties")
                                    .route("", web::get().to(routes::properties::get_properties))
                                    .route(
                                        "",
                                        web::post().to(routes::properties::create_property),
                                    ),
                            )
                            .service(
                                web::scope("/ownership")
                                    .route(
                                        "",
                                        web::get().to(routes::ownership::get_property_ownership),
                                    )
                                    .route(
                                        "",
                                        web::post()
                                            .to(routes::ownership::create_property_ownership),
                                    ),
                            )
                            .service(
                                web::scope("/email-templates")
                                    .route(
                                        "",
                                        web::get()
                                            .to(routes::email_templates::get_email_templates),
                                    )
                                    .route(
                                        "",
                                        web::post()
                                            .to(routes::email_templates::create_email_template),
                                    )
                                    .route(
                                        "/{id}",
                                        web::put()
                                            .to(routes::email_templates::update_email_template),
                                    ),
                            ),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
